//! Delimited-text serialization of result tables.
//!
//! The UI layer turns these into downloadable files; the core only defines
//! the text shape. Plain CSV conventions: comma-delimited, `\n` records,
//! fields quoted only when they contain a comma, quote, or line break,
//! embedded quotes doubled.

use core::fmt::{self, Write};
use kwic_types::{ConcordanceHit, FreqEntry, Mistake};

/// Writes a frequency table as `Word,Frequency` records, header included.
pub fn write_frequency<W: Write>(out: &mut W, table: &[FreqEntry]) -> fmt::Result {
    write_record(out, &["Word", "Frequency"])?;
    for entry in table {
        write_record(out, &[&entry.word, &entry.count.to_string()])?;
    }
    Ok(())
}

/// Writes concordance hits as `Left Context,Matched Term,Right Context`
/// records, header included.
pub fn write_concordance<W: Write>(out: &mut W, hits: &[ConcordanceHit]) -> fmt::Result {
    write_record(out, &["Left Context", "Matched Term", "Right Context"])?;
    for hit in hits {
        write_record(out, &[&hit.left, &hit.term, &hit.right])?;
    }
    Ok(())
}

/// Writes mistakes as `Major,Original,Corrected` records, header included.
pub fn write_mistakes<W: Write>(out: &mut W, mistakes: &[Mistake]) -> fmt::Result {
    write_record(out, &["Major", "Original", "Corrected"])?;
    for mistake in mistakes {
        write_record(out, &[&mistake.major, &mistake.original, &mistake.corrected])?;
    }
    Ok(())
}

fn write_record<W: Write>(out: &mut W, fields: &[&str]) -> fmt::Result {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.write_char(',')?;
        }
        write_field(out, field)?;
    }
    out.write_char('\n')
}

fn write_field<W: Write>(out: &mut W, field: &str) -> fmt::Result {
    if !field.contains([',', '"', '\n', '\r']) {
        return out.write_str(field);
    }

    out.write_char('"')?;
    for ch in field.chars() {
        if ch == '"' {
            out.write_char('"')?;
        }
        out.write_char(ch)?;
    }
    out.write_char('"')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_table() {
        let table = vec![FreqEntry::new("the", 2), FreqEntry::new("cat", 1)];
        let mut out = String::new();
        write_frequency(&mut out, &table).unwrap();
        assert_eq!(out, "Word,Frequency\nthe,2\ncat,1\n");
    }

    #[test]
    fn empty_table_is_header_only() {
        let mut out = String::new();
        write_frequency(&mut out, &[]).unwrap();
        assert_eq!(out, "Word,Frequency\n");
    }

    #[test]
    fn concordance_table() {
        let hits = vec![ConcordanceHit::new("on", "the", "mat")];
        let mut out = String::new();
        write_concordance(&mut out, &hits).unwrap();
        assert_eq!(
            out,
            "Left Context,Matched Term,Right Context\non,the,mat\n"
        );
    }

    #[test]
    fn mistakes_table() {
        let mistakes = vec![Mistake {
            major: "Nursing".into(),
            original: "teh".into(),
            corrected: "the".into(),
        }];
        let mut out = String::new();
        write_mistakes(&mut out, &mistakes).unwrap();
        assert_eq!(out, "Major,Original,Corrected\nNursing,teh,the\n");
    }

    #[test]
    fn comma_in_field_is_quoted() {
        let hits = vec![ConcordanceHit::new("well, then", "the", "end")];
        let mut out = String::new();
        write_concordance(&mut out, &hits).unwrap();
        assert!(out.contains("\"well, then\",the,end"));
    }

    #[test]
    fn embedded_quotes_doubled() {
        let mut out = String::new();
        write_field(&mut out, "say \"hi\"").unwrap();
        assert_eq!(out, "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn newline_in_field_is_quoted() {
        let mut out = String::new();
        write_field(&mut out, "a\nb").unwrap();
        assert_eq!(out, "\"a\nb\"");
    }

    #[test]
    fn plain_field_unquoted() {
        let mut out = String::new();
        write_field(&mut out, "plain").unwrap();
        assert_eq!(out, "plain");
    }
}
