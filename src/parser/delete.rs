use nom::bytes::complete::tag_no_case;
use nom::character::complete::multispace1;
use nom::IResult;
use nom::multi::many1;

use crate::parser::Statement;

/// Parse `delete <id> [<id>...]`
pub(crate) fn delete(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_no_case("DELETE")(input)?;
    let (input, transaction_ids) = many1(transaction_id)(input)?;
    Ok((input, Statement::Delete(transaction_ids)))
}

fn transaction_id(input: &str) -> IResult<&str, u32> {
    let (input, _) = multispace1(input)?;
    let (input, transaction_id) = nom::character::complete::u32(input)?;
    Ok((input, transaction_id))
}

#[cfg(test)]
mod tests {
    use crate::parser::{parse, Statement};

    #[test]
    fn test() {
        assert_eq!(parse("delete 7"), Ok(Statement::Delete(vec![7])));
        assert_eq!(parse("DELETE 7 8 21"), Ok(Statement::Delete(vec![7, 8, 21])));

        assert!(parse("delete").is_err());
    }
}
