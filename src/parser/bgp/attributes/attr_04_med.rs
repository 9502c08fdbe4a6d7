use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::Bytes;

pub fn parse_med(mut input: Bytes) -> Result<u32, ParserError> {
    input.expect_remaining_eq(4, "MULTI_EXIT_DISCRIMINATOR")?;
    input.read_u32()
}
