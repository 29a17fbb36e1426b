//! Boolean query parsing shared by the retrieval models.
//!
//! The grammar is whitespace-tokenized: `AND`, `OR`, `NOT` (any case)
//! are reserved operator tokens, everything else is a literal term.
//! Precedence is NOT > AND > OR, and two adjacent bare terms combine
//! with an implicit AND, the usual boolean-IR convention.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryNode {
    Term(String),
    And(Box<QueryNode>, Box<QueryNode>),
    Or(Box<QueryNode>, Box<QueryNode>),
    Not(Box<QueryNode>),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("empty query")]
    Empty,
    #[error("dangling operator `{0}` at end of query")]
    DanglingOperator(String),
    #[error("operator `{0}` where a search term was expected")]
    UnexpectedOperator(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Term(String),
    And,
    Or,
    Not,
}

impl Token {
    fn name(&self) -> &str {
        match self {
            Token::Term(t) => t,
            Token::And => "AND",
            Token::Or => "OR",
            Token::Not => "NOT",
        }
    }
}

fn lex(query: &str) -> Vec<Token> {
    query
        .split_whitespace()
        .map(|word| match word.to_uppercase().as_str() {
            "AND" => Token::And,
            "OR" => Token::Or,
            "NOT" => Token::Not,
            _ => Token::Term(word.to_lowercase()),
        })
        .collect()
}

/// Splits a query into literal terms, lowercased, with no operator
/// recognition. This is the linear model's query representation.
pub fn query_terms(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect()
}

/// Parses a boolean query string into its expression tree.
pub fn parse_query(query: &str) -> Result<QueryNode, QueryError> {
    let tokens = lex(query);
    if tokens.is_empty() {
        return Err(QueryError::Empty);
    }
    let mut iter = tokens.into_iter().peekable();
    parse_or(&mut iter)
}

type Tokens = std::iter::Peekable<std::vec::IntoIter<Token>>;

fn parse_or(tokens: &mut Tokens) -> Result<QueryNode, QueryError> {
    let mut node = parse_and(tokens)?;
    while tokens.peek() == Some(&Token::Or) {
        tokens.next();
        if tokens.peek().is_none() {
            return Err(QueryError::DanglingOperator("OR".into()));
        }
        let rhs = parse_and(tokens)?;
        node = QueryNode::Or(Box::new(node), Box::new(rhs));
    }
    Ok(node)
}

fn parse_and(tokens: &mut Tokens) -> Result<QueryNode, QueryError> {
    let mut node = parse_not(tokens)?;
    loop {
        match tokens.peek() {
            Some(Token::And) => {
                tokens.next();
                if tokens.peek().is_none() {
                    return Err(QueryError::DanglingOperator("AND".into()));
                }
            }
            // A following term or NOT starts another operand: implicit AND.
            Some(Token::Term(_)) | Some(Token::Not) => {}
            _ => break,
        }
        let rhs = parse_not(tokens)?;
        node = QueryNode::And(Box::new(node), Box::new(rhs));
    }
    Ok(node)
}

fn parse_not(tokens: &mut Tokens) -> Result<QueryNode, QueryError> {
    match tokens.next() {
        Some(Token::Not) => {
            if tokens.peek().is_none() {
                return Err(QueryError::DanglingOperator("NOT".into()));
            }
            Ok(QueryNode::Not(Box::new(parse_not(tokens)?)))
        }
        Some(Token::Term(t)) => Ok(QueryNode::Term(t)),
        Some(op) => Err(QueryError::UnexpectedOperator(op.name().to_string())),
        None => Err(QueryError::Empty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(t: &str) -> QueryNode {
        QueryNode::Term(t.to_string())
    }

    #[test]
    fn single_term() {
        assert_eq!(parse_query("fox").unwrap(), term("fox"));
    }

    #[test]
    fn operators_are_case_insensitive_and_terms_lowercased() {
        assert_eq!(
            parse_query("Fox and DOG").unwrap(),
            QueryNode::And(Box::new(term("fox")), Box::new(term("dog")))
        );
    }

    #[test]
    fn adjacent_bare_terms_imply_and() {
        assert_eq!(
            parse_query("fox dog").unwrap(),
            QueryNode::And(Box::new(term("fox")), Box::new(term("dog")))
        );
    }

    #[test]
    fn not_binds_tighter_than_and_binds_tighter_than_or() {
        // a OR NOT b AND c == a OR ((NOT b) AND c)
        assert_eq!(
            parse_query("a OR NOT b AND c").unwrap(),
            QueryNode::Or(
                Box::new(term("a")),
                Box::new(QueryNode::And(
                    Box::new(QueryNode::Not(Box::new(term("b")))),
                    Box::new(term("c"))
                ))
            )
        );
    }

    #[test]
    fn dangling_operator_names_the_fragment() {
        assert_eq!(
            parse_query("fox AND").unwrap_err(),
            QueryError::DanglingOperator("AND".into())
        );
        assert_eq!(
            parse_query("NOT").unwrap_err(),
            QueryError::DanglingOperator("NOT".into())
        );
    }

    #[test]
    fn doubled_operator_is_rejected() {
        assert_eq!(
            parse_query("fox AND AND dog").unwrap_err(),
            QueryError::UnexpectedOperator("AND".into())
        );
        assert_eq!(
            parse_query("OR fox").unwrap_err(),
            QueryError::UnexpectedOperator("OR".into())
        );
    }

    #[test]
    fn empty_query_is_rejected() {
        assert_eq!(parse_query("   ").unwrap_err(), QueryError::Empty);
    }
}
