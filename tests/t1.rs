use anyhow::Result;
use fancyexpr::read::{read_all, write_all};

const INPUT: &[u8] = include_bytes!("t-input.fc");
const EXPECTED: &[u8] = include_bytes!("t-expected.fc");

#[test]
fn t1() -> Result<()> {
    let forms = read_all(INPUT)?;
    let mut out = Vec::<u8>::new();
    write_all(&mut out, &forms)?;
    assert_eq!(out, EXPECTED);
    Ok(())
}
