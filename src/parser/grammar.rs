//! Assignment parser
//!
//! A single forward pass over the token stream tracking which side of the
//! assignment operator the next text run belongs to. A pair is flushed into
//! the store as soon as its value is read, so a missing trailing separator
//! never loses the last pair.

use tracing::{debug, trace, warn};

use crate::config::TrailingPair;
use crate::error::{ParseError, Span};
use crate::store::VariableStore;

use super::lexer::Token;

/// Parse a token stream into a variable store
pub fn parse<I>(tokens: I, trailing: TrailingPair) -> Result<VariableStore, ParseError>
where
    I: IntoIterator<Item = (Token, Span)>,
{
    let mut store = VariableStore::new();
    let mut left_of_assignment = true;
    // Values flush immediately, so only a key can be pending
    let mut pending: Option<(String, Span)> = None;
    let mut count = 0usize;

    for (token, span) in tokens {
        count += 1;
        trace!(%token, ?span, left_of_assignment, "token");
        match token {
            Token::Text(text) if left_of_assignment => {
                if let Some((key, key_span)) = pending.take() {
                    match trailing {
                        TrailingPair::Strict => {
                            return Err(ParseError::malformed(
                                format!("key '{}' has no assignment", key),
                                key_span,
                            ));
                        }
                        TrailingPair::Lenient => {
                            warn!(key = %key, "dropping key without assignment");
                        }
                    }
                }
                pending = Some((text, span));
            }
            Token::Text(value) => {
                left_of_assignment = true;
                match pending.take() {
                    Some((key, _)) => {
                        store.upsert(key, value);
                    }
                    None => match trailing {
                        TrailingPair::Strict => {
                            return Err(ParseError::malformed(
                                format!("value '{}' has no key", value),
                                span,
                            ));
                        }
                        TrailingPair::Lenient => {
                            warn!(value = %value, "dropping value without key");
                        }
                    },
                }
            }
            Token::Separator(_) => {}
            // A repeated operator keeps us right of the assignment
            Token::Assignment(_) => left_of_assignment = false,
            Token::End => break,
        }
    }

    if let Some((key, span)) = pending {
        match trailing {
            TrailingPair::Strict => {
                return Err(ParseError::malformed(
                    format!("key '{}' has no value", key),
                    span,
                ));
            }
            TrailingPair::Lenient => {
                warn!(key = %key, "dropping dangling key at end of input");
            }
        }
    }

    debug!(tokens = count, variables = store.len(), "parsed assignments");
    Ok(store)
}
