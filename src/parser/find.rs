use nom::bytes::complete::tag_no_case;
use nom::character::complete::multispace1;
use nom::combinator::rest;
use nom::IResult;

use crate::parser::Statement;

/// Parse `find <keywords>`. Keywords run to the end of the line.
pub(crate) fn find(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_no_case("FIND")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, keywords) = rest(input)?;
    Ok((input, Statement::Find(keywords.trim().to_string())))
}

#[cfg(test)]
mod tests {
    use crate::parser::{parse, Statement};

    #[test]
    fn test() {
        let command = "find mercado extra";
        assert_eq!(parse(command), Ok(Statement::Find("mercado extra".to_string())));

        // keywords are required
        assert!(parse("find").is_err());
    }
}
