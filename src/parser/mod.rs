mod add;
mod budget;
mod categories;
mod delete;
mod export;
mod find;
mod import;
mod income;
mod list;
mod set;
mod suggest;
mod summary;

use chrono::NaiveDate;

use nom::{AsChar, InputTakeAtPosition, IResult};
use nom::branch::alt;
use nom::bytes::complete::{is_not, tag_no_case};
use nom::character::complete::char;
use nom::error::ErrorKind;
use nom::sequence::delimited;

use crate::common::Error;

#[derive(Debug, PartialEq)]
pub(crate) enum Statement {
    /// import <path> (owner <name>, ref <YYYY-MM>, dryrun)
    Import(String, ImportOptions),
    /// add <date> 'title' <amount> (category '<c>', owner <o>, ref <YYYY-MM>)
    Add(NewEntry),
    /// list [YYYY-MM] [owner <o>] [category '<c>']
    List(ListFilter),
    /// find <keywords>
    Find(String),
    /// suggest [all]
    Suggest(SuggestScope),
    /// set <id> '<category>'
    Set(u32, String),
    /// delete <id> [<id>...]
    Delete(Vec<u32>),
    /// summary [YYYY-MM] [owner <o>]
    Summary(Option<(i32, u32)>, Option<String>),
    /// budget [YYYY-MM] [owner <o>]
    Budget(Option<(i32, u32)>, Option<String>),
    /// budget set '<category>' <amount> [YYYY-MM] [owner <o>]
    BudgetSet(BudgetEntry),
    /// income [YYYY-MM]
    Income(Option<(i32, u32)>),
    /// income add <date> '<source>' <amount> [owner <o>]
    IncomeAdd(NewIncome),
    Categories,
    /// categories add '<name>'
    CategoryAdd(String),
    /// categories rm '<name>'
    CategoryRemove(String),
    /// export to <path>
    Export(String),
    Help,
}

#[derive(Debug, PartialEq, Default)]
pub(crate) struct ImportOptions {
    pub(crate) owner: Option<String>,
    pub(crate) reference: Option<(i32, u32)>,
    pub(crate) dry_run: bool,
}

#[derive(Debug, PartialEq)]
pub(crate) struct NewEntry {
    pub(crate) date: NaiveDate,
    pub(crate) title: String,
    pub(crate) amount: f32,
    pub(crate) category: Option<String>,
    pub(crate) owner: Option<String>,
    pub(crate) reference: Option<(i32, u32)>,
}

#[derive(Debug, PartialEq, Default)]
pub(crate) struct ListFilter {
    pub(crate) month: Option<(i32, u32)>,
    pub(crate) owner: Option<String>,
    pub(crate) category: Option<String>,
}

#[derive(Debug, PartialEq)]
pub(crate) enum SuggestScope {
    /// Only rows without a meaningful category
    Unresolved,
    All,
}

#[derive(Debug, PartialEq)]
pub(crate) struct BudgetEntry {
    pub(crate) category: String,
    pub(crate) amount: f32,
    pub(crate) month: Option<(i32, u32)>,
    pub(crate) owner: Option<String>,
}

#[derive(Debug, PartialEq)]
pub(crate) struct NewIncome {
    pub(crate) date: NaiveDate,
    pub(crate) source: String,
    pub(crate) amount: f32,
    pub(crate) owner: Option<String>,
}

pub(crate) fn parse(command: &str) -> Result<Statement, Error> {
    let result = alt((
        import::import,
        add::add,
        list::list,
        find::find,
        suggest::suggest,
        set::set,
        delete::delete,
        summary::summary,
        budget::budget_set,
        budget::budget,
        income::income_add,
        income::income,
        categories::categories_add,
        categories::categories_remove,
        categories::categories,
        export::export,
        help,
    ))(command);
    match result {
        Ok((_, statement)) => Ok(statement),
        Err(e) => Err(Error::new(e.to_string()))
    }
}

fn help(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_no_case("help")(input)?;
    Ok((input, Statement::Help))
}

pub(crate) fn non_space(input: &str) -> IResult<&str, &str> {
    input.split_at_position_complete(char::is_whitespace)
}

/// A category, title or source wrapped in single quotes
pub(crate) fn quoted(input: &str) -> IResult<&str, &str> {
    delimited(char('\''), is_not("'"), char('\''))(input)
}

/// `YYYY-MM`. Years are limited to four digits so the period always fits a
/// `NaiveDate`. An out of range year or month fails the whole parse:
/// `summary 2026-13` reports an error instead of running a bare `summary`.
pub(crate) fn month(input: &str) -> IResult<&str, (i32, u32)> {
    let (input, year) = nom::character::complete::i32(input)?;
    let (input, _) = char('-')(input)?;
    let (input, month) = nom::character::complete::u32(input)?;
    if !(1000..=9999).contains(&year) || !(1..=12).contains(&month) {
        return Err(nom::Err::Failure(nom::error::Error::new(input, ErrorKind::Verify)));
    }
    Ok((input, (year, month)))
}

/// `YYYY-MM-DD` or `DD/MM/YYYY`
pub(crate) fn date(input: &str) -> IResult<&str, NaiveDate> {
    let (rest, token) = non_space(input)?;
    let parsed = NaiveDate::parse_from_str(token, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(token, "%d/%m/%Y"));
    match parsed {
        Ok(date) => Ok((rest, date)),
        Err(_) => Err(nom::Err::Error(nom::error::Error::new(input, ErrorKind::Verify))),
    }
}

/// A plain decimal number, e.g. `-1234.56`
pub(crate) fn decimal_num(input: &str) -> IResult<&str, f32> {
    let (input, num) = input.split_at_position1_complete(
        |c| !(c.is_dec_digit() || c == '.' || c == '-'),
        ErrorKind::Float,
    )?;
    match num.parse::<f32>() {
        Ok(value) => Ok((input, value)),
        Err(_) => Err(nom::Err::Error(nom::error::Error::new(input, ErrorKind::Float))),
    }
}

/// An options block in parentheses, e.g. `(owner Ana, dryrun)`
pub(crate) fn parentheses(input: &str) -> IResult<&str, &str> {
    delimited(char('('), is_not(")"), char(')'))(input)
}
