//! The HTTP methods the gateway acts on.
//!
//! Only `GET` and `POST` reach the store. Every other method, standard or
//! not, fails to parse and the router answers it with the fixed `500`.

use std::str::FromStr;

/// A method the router dispatches on.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Method {
    Get,
    Post,
}

/// Parses an uppercase method string (e.g. `"GET"`). Case-sensitive per RFC 9110 §9.1.
impl FromStr for Method {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET"  => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            _      => Err(()),
        }
    }
}
