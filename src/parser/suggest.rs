use nom::bytes::complete::tag_no_case;
use nom::character::complete::multispace1;
use nom::combinator::opt;
use nom::IResult;
use nom::sequence::preceded;

use crate::parser::{Statement, SuggestScope};

/// Parse `suggest` or `suggest all`
pub(crate) fn suggest(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_no_case("SUGGEST")(input)?;
    let (input, all) = opt(preceded(multispace1, tag_no_case("ALL")))(input)?;

    let scope = if all.is_some() { SuggestScope::All } else { SuggestScope::Unresolved };
    Ok((input, Statement::Suggest(scope)))
}
