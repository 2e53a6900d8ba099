use derive_more::{Display, From};
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;

// NOTE:
// - Error must implement Debug to be used as E in fn main() -> Result<(), E>
// - Error must implement Display for Any::error()
#[derive(Debug, Display, From)]
pub enum Error {
    Io(IoError),
    SerdeJson(SerdeJsonError),
    Lookup(String),
}
