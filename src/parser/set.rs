use nom::bytes::complete::tag_no_case;
use nom::character::complete::multispace1;
use nom::IResult;

use crate::parser::{quoted, Statement};

/// Parse `set <id> '<category>'`
pub(crate) fn set(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_no_case("SET")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, id) = nom::character::complete::u32(input)?;
    let (input, _) = multispace1(input)?;
    let (input, category) = quoted(input)?;
    Ok((input, Statement::Set(id, category.to_string())))
}

#[cfg(test)]
mod tests {
    use crate::parser::{parse, Statement};

    #[test]
    fn test() {
        let command = "set 42 'Saúde/Farmácia'";
        assert_eq!(parse(command), Ok(Statement::Set(42, "Saúde/Farmácia".to_string())));

        assert!(parse("set 42").is_err());
        assert!(parse("set abc 'Pets'").is_err());
    }
}
