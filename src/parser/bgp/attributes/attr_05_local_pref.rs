use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::Bytes;

pub fn parse_local_pref(mut input: Bytes) -> Result<u32, ParserError> {
    input.expect_remaining_eq(4, "LOCAL_PREFERENCE")?;
    input.read_u32()
}
