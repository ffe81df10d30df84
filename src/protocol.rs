use serde::Deserialize;
use serde::Serialize;

#[derive(Deserialize, Serialize, Debug)]
pub enum Request {
    Shorten(String),
    Resolve(String),
}

#[derive(Deserialize, Serialize, Debug)]
pub enum Response {
    Shortened(String),
    Resolved(String),
    NotFound(String),
    Err(String),
}
