use crate::models::*;
use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::Bytes;

pub fn parse_origin(mut input: Bytes) -> Result<Origin, ParserError> {
    input.expect_remaining_eq(1, "ORIGIN")?;
    let value = input.read_u8()?;
    Origin::try_from(value).map_err(|_| ParserError::malformed(format!("ORIGIN value {}", value)))
}
