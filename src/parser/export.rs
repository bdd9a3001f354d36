use nom::bytes::complete::tag_no_case;
use nom::character::complete::multispace1;
use nom::IResult;

use crate::parser::{non_space, Statement};

/// Parse `export to <file_path>`
pub(crate) fn export(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_no_case("EXPORT")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, _) = tag_no_case("TO")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, file_path) = non_space(input)?;

    let quotation_marks: &[_] = &['\'', '"'];
    Ok((input, Statement::Export(file_path.trim_matches(quotation_marks).to_string())))
}

#[cfg(test)]
mod tests {
    use crate::parser::{parse, Statement};

    #[test]
    fn test() {
        assert_eq!(
            parse("export to ./financas/ledger.csv"),
            Ok(Statement::Export("./financas/ledger.csv".to_string()))
        );
        assert_eq!(
            parse("EXPORT TO './financas/ledger.csv'"),
            Ok(Statement::Export("./financas/ledger.csv".to_string()))
        );
    }
}
