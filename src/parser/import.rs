use nom::bytes::complete::tag_no_case;
use nom::character::complete::{multispace0, multispace1};
use nom::combinator::opt;
use nom::IResult;

use crate::parser::{month, non_space, parentheses, ImportOptions, Statement};

/// Parse `import ./extratos/nubank (owner Ana, ref 2026-02, dryrun)`
/// TODO: handle file path with whitespace
pub(crate) fn import(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_no_case("IMPORT")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, file_path) = non_space(input)?;
    let (input, _) = multispace0(input)?;
    let (input, options) = opt(parentheses)(input)?;

    let mut import_options = ImportOptions::default();
    if let Some(options) = options {
        for option in options.split(',') {
            let option = option.trim();
            if option == "dryrun" {
                import_options.dry_run = true;
            } else if let Some(value) = option.strip_prefix("owner") {
                let value = value.trim().trim_matches('\'');
                if !value.is_empty() {
                    import_options.owner = Some(value.to_string());
                }
            } else if let Some(value) = option.strip_prefix("ref") {
                if let Ok((_, reference)) = month(value.trim()) {
                    import_options.reference = Some(reference);
                }
            }
        }
    }

    let quotation_marks: &[_] = &['\'', '"'];
    Ok((input, Statement::Import(
        file_path.trim_matches(quotation_marks).to_string(),
        import_options,
    )))
}
