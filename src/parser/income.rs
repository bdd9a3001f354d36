use nom::bytes::complete::tag_no_case;
use nom::character::complete::multispace1;
use nom::combinator::opt;
use nom::IResult;
use nom::sequence::{delimited, preceded};

use crate::parser::{date, decimal_num, month, non_space, quoted, NewIncome, Statement};

/// Parse `income [YYYY-MM]`
pub(crate) fn income(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_no_case("INCOME")(input)?;
    let (input, month) = opt(preceded(multispace1, month))(input)?;
    Ok((input, Statement::Income(month)))
}

/// Parse `income add <date> '<source>' <amount> [owner <name>]`
pub(crate) fn income_add(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_no_case("INCOME")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, _) = tag_no_case("ADD")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, date) = date(input)?;
    let (input, _) = multispace1(input)?;
    let (input, source) = quoted(input)?;
    let (input, _) = multispace1(input)?;
    let (input, amount) = decimal_num(input)?;
    let (input, owner) = opt(preceded(
        delimited(multispace1, tag_no_case("owner"), multispace1),
        non_space,
    ))(input)?;

    Ok((input, Statement::IncomeAdd(NewIncome {
        date,
        source: source.to_string(),
        amount,
        owner: owner.map(|o| o.to_string()),
    })))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::parser::{parse, NewIncome, Statement};

    #[test]
    fn test() {
        assert_eq!(parse("income"), Ok(Statement::Income(None)));
        assert_eq!(parse("income 2026-01"), Ok(Statement::Income(Some((2026, 1)))));

        let command = "income add 2026-01-05 'Salário (Principal)' 8500 owner Ana";
        assert_eq!(parse(command), Ok(Statement::IncomeAdd(NewIncome {
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            source: "Salário (Principal)".to_string(),
            amount: 8500.0,
            owner: Some("Ana".to_string()),
        })));

        let command = "income add 2026-01-28 'Renda Extra' 1200.75";
        assert_eq!(parse(command), Ok(Statement::IncomeAdd(NewIncome {
            date: NaiveDate::from_ymd_opt(2026, 1, 28).unwrap(),
            source: "Renda Extra".to_string(),
            amount: 1200.75,
            owner: None,
        })));
    }
}
