use nom::bytes::complete::tag_no_case;
use nom::character::complete::multispace1;
use nom::IResult;

use crate::parser::{quoted, Statement};

/// Parse `categories`
pub(crate) fn categories(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_no_case("CATEGORIES")(input)?;
    Ok((input, Statement::Categories))
}

/// Parse `categories add '<name>'`
pub(crate) fn categories_add(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_no_case("CATEGORIES")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, _) = tag_no_case("ADD")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, name) = quoted(input)?;
    Ok((input, Statement::CategoryAdd(name.to_string())))
}

/// Parse `categories rm '<name>'`
pub(crate) fn categories_remove(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_no_case("CATEGORIES")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, _) = tag_no_case("RM")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, name) = quoted(input)?;
    Ok((input, Statement::CategoryRemove(name.to_string())))
}

#[cfg(test)]
mod tests {
    use crate::parser::{parse, Statement};

    #[test]
    fn test() {
        assert_eq!(parse("categories"), Ok(Statement::Categories));
        assert_eq!(
            parse("categories add 'Viagens'"),
            Ok(Statement::CategoryAdd("Viagens".to_string()))
        );
        assert_eq!(
            parse("categories rm 'Viagens'"),
            Ok(Statement::CategoryRemove("Viagens".to_string()))
        );
    }
}
