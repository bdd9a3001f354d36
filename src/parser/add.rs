use nom::bytes::complete::tag_no_case;
use nom::character::complete::{multispace0, multispace1};
use nom::combinator::opt;
use nom::IResult;

use crate::parser::{date, decimal_num, month, parentheses, quoted, NewEntry, Statement};

/// Parse `add 2026-01-15 'PADARIA DO ZE' 25.50 (category 'Lazer/Restaurantes', owner Ana, ref 2026-02)`
pub(crate) fn add(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_no_case("ADD")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, date) = date(input)?;
    let (input, _) = multispace1(input)?;
    let (input, title) = quoted(input)?;
    let (input, _) = multispace1(input)?;
    let (input, amount) = decimal_num(input)?;
    let (input, _) = multispace0(input)?;
    let (input, options) = opt(parentheses)(input)?;

    let mut entry = NewEntry {
        date,
        title: title.to_string(),
        amount,
        category: None,
        owner: None,
        reference: None,
    };
    if let Some(options) = options {
        for option in options.split(',') {
            let option = option.trim();
            if let Some(value) = option.strip_prefix("category") {
                let value = value.trim().trim_matches('\'');
                if !value.is_empty() {
                    entry.category = Some(value.to_string());
                }
            } else if let Some(value) = option.strip_prefix("owner") {
                let value = value.trim().trim_matches('\'');
                if !value.is_empty() {
                    entry.owner = Some(value.to_string());
                }
            } else if let Some(value) = option.strip_prefix("ref") {
                if let Ok((_, reference)) = month(value.trim()) {
                    entry.reference = Some(reference);
                }
            }
        }
    }

    Ok((input, Statement::Add(entry)))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::parser::{parse, NewEntry, Statement};

    #[test]
    fn test() {
        let command = "add 2026-01-15 'PADARIA DO ZE' 25.50";
        let result = parse(command);
        assert_eq!(result, Ok(Statement::Add(NewEntry {
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            title: "PADARIA DO ZE".to_string(),
            amount: 25.5,
            category: None,
            owner: None,
            reference: None,
        })));

        let command = "add 15/01/2026 'ALUGUEL' -2500 (category 'Moradia', owner Bruno, ref 2026-02)";
        let result = parse(command);
        assert_eq!(result, Ok(Statement::Add(NewEntry {
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            title: "ALUGUEL".to_string(),
            amount: -2500.0,
            category: Some("Moradia".to_string()),
            owner: Some("Bruno".to_string()),
            reference: Some((2026, 2)),
        })));

        // title has to be quoted
        assert!(parse("add 2026-01-15 PADARIA 25.50").is_err());
    }
}
