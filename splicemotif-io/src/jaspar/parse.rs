use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::anychar;
use nom::character::complete::line_ending;
use nom::character::complete::multispace0;
use nom::character::complete::not_line_ending;
use nom::character::complete::space0;
use nom::character::complete::space1;
use nom::combinator::eof;
use nom::combinator::map_res;
use nom::multi::many1;
use nom::multi::separated_list0;
use nom::sequence::delimited;
use nom::sequence::preceded;
use nom::sequence::separated_pair;
use nom::sequence::terminated;
use nom::IResult;
use nom::Parser;

use splicemotif::abc::Nucleotide;
use splicemotif::abc::Symbol;

use super::Record;

fn end_of_line(input: &str) -> IResult<&str, &str> {
    alt((line_ending, eof)).parse(input)
}

pub fn symbol(input: &str) -> IResult<&str, Nucleotide> {
    map_res(anychar, Nucleotide::from_char).parse(input)
}

pub fn counts(input: &str) -> IResult<&str, Vec<u32>> {
    delimited(
        delimited(space0, tag("["), space0),
        separated_list0(space1, nom::character::complete::u32),
        delimited(space0, tag("]"), space0),
    )
    .parse(input)
}

pub fn matrix_column(input: &str) -> IResult<&str, (Nucleotide, Vec<u32>)> {
    terminated(separated_pair(symbol, space1, counts), end_of_line).parse(input)
}

pub fn header(input: &str) -> IResult<&str, &str> {
    preceded(tag(">"), terminated(not_line_ending, end_of_line)).parse(input)
}

pub fn record(input: &str) -> IResult<&str, Result<Record, crate::error::Error>> {
    let (input, header) = header(input)?;
    let (input, columns) = many1(matrix_column).parse(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, Record::from_parts(header, columns)))
}
