use nom::bytes::complete::tag_no_case;
use nom::character::complete::multispace1;
use nom::combinator::opt;
use nom::IResult;
use nom::sequence::{delimited, preceded};

use crate::parser::{month, non_space, Statement};

/// Parse `summary [YYYY-MM] [owner <name>]`
pub(crate) fn summary(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_no_case("SUMMARY")(input)?;
    let (input, month) = opt(preceded(multispace1, month))(input)?;
    let (input, owner) = opt(preceded(
        delimited(multispace1, tag_no_case("owner"), multispace1),
        non_space,
    ))(input)?;

    Ok((input, Statement::Summary(month, owner.map(|o| o.to_string()))))
}
