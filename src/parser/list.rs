use nom::bytes::complete::tag_no_case;
use nom::character::complete::multispace1;
use nom::combinator::opt;
use nom::IResult;
use nom::sequence::{delimited, preceded};

use crate::parser::{month, non_space, quoted, ListFilter, Statement};

/// Parse `list [YYYY-MM] [owner <name>] [category '<category>']`
pub(crate) fn list(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_no_case("LIST")(input)?;
    let (input, month) = opt(preceded(multispace1, month))(input)?;
    let (input, owner) = opt(preceded(
        delimited(multispace1, tag_no_case("owner"), multispace1),
        non_space,
    ))(input)?;
    let (input, category) = opt(preceded(
        delimited(multispace1, tag_no_case("category"), multispace1),
        quoted,
    ))(input)?;

    Ok((input, Statement::List(ListFilter {
        month,
        owner: owner.map(|o| o.to_string()),
        category: category.map(|c| c.to_string()),
    })))
}
