use nom::bytes::complete::tag_no_case;
use nom::character::complete::multispace1;
use nom::combinator::opt;
use nom::IResult;
use nom::sequence::{delimited, preceded};

use crate::parser::{decimal_num, month, non_space, quoted, BudgetEntry, Statement};

/// Parse `budget [YYYY-MM] [owner <name>]`
pub(crate) fn budget(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_no_case("BUDGET")(input)?;
    let (input, month) = opt(preceded(multispace1, month))(input)?;
    let (input, owner) = opt(preceded(
        delimited(multispace1, tag_no_case("owner"), multispace1),
        non_space,
    ))(input)?;

    Ok((input, Statement::Budget(month, owner.map(|o| o.to_string()))))
}

/// Parse `budget set '<category>' <amount> [YYYY-MM] [owner <name>]`
pub(crate) fn budget_set(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_no_case("BUDGET")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, _) = tag_no_case("SET")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, category) = quoted(input)?;
    let (input, _) = multispace1(input)?;
    let (input, amount) = decimal_num(input)?;
    let (input, month) = opt(preceded(multispace1, month))(input)?;
    let (input, owner) = opt(preceded(
        delimited(multispace1, tag_no_case("owner"), multispace1),
        non_space,
    ))(input)?;

    Ok((input, Statement::BudgetSet(BudgetEntry {
        category: category.to_string(),
        amount,
        month,
        owner: owner.map(|o| o.to_string()),
    })))
}
