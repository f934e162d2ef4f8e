//! Line crunching and listing.
//!
//! [`tokenize`] is the CRUNCH half: it folds reserved words into their token
//! bytes while leaving string literals, REM tails, and DATA tails untouched.
//! [`detokenize`] is the LIST half and undoes it.

use super::token;

fn is_letter(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

/// Matches the longest reserved word at `src[pos..]`, case-insensitively.
/// A word only matches when the byte after it is not a letter or digit,
/// except that words ending in `(` carry their own boundary and `FN` always
/// matches (so `FNA` cruches to the FN token followed by `A`).
fn match_reserved(src: &[u8], pos: usize) -> Option<(u8, usize)> {
    let mut best: Option<(u8, usize)> = None;
    for &(word, tok) in token::RESERVED_WORDS {
        let w = word.as_bytes();
        if pos + w.len() > src.len() {
            continue;
        }
        if !src[pos..pos + w.len()]
            .iter()
            .zip(w)
            .all(|(a, b)| a.to_ascii_uppercase() == *b)
        {
            continue;
        }
        let boundary = if w[w.len() - 1] == b'(' || tok == token::FN {
            true
        } else {
            match src.get(pos + w.len()) {
                Some(&next) => !is_letter(next) && !is_digit(next),
                None => true,
            }
        };
        if boundary && best.map_or(true, |(_, len)| w.len() > len) {
            best = Some((tok, w.len()));
        }
    }
    best
}

/// Crunches one source line (line number already stripped, line ending
/// stripped) into a tokenised body.
pub fn tokenize(line: &str) -> Vec<u8> {
    let src = line.as_bytes();
    let mut out = Vec::with_capacity(src.len());
    let mut pos = 0;
    let mut in_string = false;
    let mut in_rem = false;
    let mut in_data = false;

    while pos < src.len() {
        let b = src[pos];
        if b == b'"' {
            in_string = !in_string;
            out.push(b);
            pos += 1;
            continue;
        }
        if in_string || in_rem {
            out.push(b);
            pos += 1;
            continue;
        }
        if in_data {
            if b == b':' {
                in_data = false;
            }
            out.push(b);
            pos += 1;
            continue;
        }
        if let Some((tok, len)) = match_reserved(src, pos) {
            out.push(tok);
            pos += len;
            if tok == token::REM {
                in_rem = true;
            } else if tok == token::DATA {
                in_data = true;
            }
            continue;
        }
        out.push(b.to_ascii_uppercase());
        pos += 1;
    }
    out
}

/// Renders a tokenised body back to readable text. Inside `"..."` no token
/// lookup happens; everywhere else bytes at `0x80..` expand to their word.
pub fn detokenize(body: &[u8]) -> String {
    let mut out = String::with_capacity(body.len() * 2);
    let mut in_string = false;
    for &b in body {
        if b == b'"' {
            in_string = !in_string;
            out.push('"');
            continue;
        }
        if !in_string && token::is_token(b) {
            out.push_str(token::name(b));
        } else {
            out.push(b as char);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_crunch() {
        let t = tokenize("PRINT \"HELLO\"");
        assert_eq!(t[0], token::PRINT);
        assert_eq!(&t[1..], b" \"HELLO\"");
    }

    #[test]
    fn test_case_folding() {
        assert_eq!(tokenize("print a"), tokenize("PRINT A"));
        assert_eq!(detokenize(&tokenize("let x = 1")), "LET X = 1");
    }

    #[test]
    fn test_string_literal_preserved() {
        let t = tokenize("PRINT \"for next\"");
        assert_eq!(detokenize(&t), "PRINT \"for next\"");
    }

    #[test]
    fn test_rem_tail_preserved() {
        let t = tokenize("REM for i goes here");
        assert_eq!(t[0], token::REM);
        assert_eq!(&t[1..], b" for i goes here");
    }

    #[test]
    fn test_data_tail_preserved_until_colon() {
        let t = tokenize("DATA for,10: PRINT 1");
        assert_eq!(t[0], token::DATA);
        assert_eq!(&t[1..8], b" for,10");
        assert_eq!(t[8], b':');
        // after the colon the cruncher is live again
        assert!(t[9..].contains(&token::PRINT));
    }

    #[test]
    fn test_word_boundary_blocks_identifiers() {
        // TOTAL must not crunch its TO prefix
        let t = tokenize("TOTAL=1");
        assert!(!t.contains(&token::TO));
        assert_eq!(&t[..5], b"TOTAL");
    }

    #[test]
    fn test_fn_always_crunches() {
        let t = tokenize("FNA(2)");
        assert_eq!(t[0], token::FN);
        assert_eq!(t[1], b'A');
    }

    #[test]
    fn test_paren_words_need_no_boundary() {
        let t = tokenize("PRINT TAB(5)");
        assert!(t.contains(&token::TAB));
        let t = tokenize("PRINT SPC(5)");
        assert!(t.contains(&token::SPC));
    }

    #[test]
    fn test_longest_match_wins() {
        // INPUT, not IN + PUT or INT
        let t = tokenize("INPUT X");
        assert_eq!(t[0], token::INPUT);
        // RESTORE, not READ prefix confusion
        let t = tokenize("RESTORE");
        assert_eq!(t, vec![token::RESTORE]);
    }

    #[test]
    fn test_operator_chars_stay_ascii() {
        let t = tokenize("A=1+2*3^4/5");
        for &b in &t {
            assert!(b < 0x80, "operator byte {:02X} was tokenised", b);
        }
    }

    #[test]
    fn test_dollar_functions() {
        let t = tokenize("PRINT LEFT$(A$,2)");
        assert!(t.contains(&token::LEFT));
        let t = tokenize("PRINT CHR$(65)");
        assert!(t.contains(&token::CHR));
    }

    #[test]
    fn test_detokenize_round_trip() {
        for line in &[
            "FOR I = 1 TO 10 STEP 2",
            "IF X > 2 THEN GOSUB 100",
            "PRINT \"don't crunch me\";TAB(12);X",
            "DATA one, two, 3.5",
            "ON X GOTO 10,20,30",
        ] {
            // every line is already upper-case outside strings and tails,
            // so listing it back must reproduce it exactly
            let crunched = tokenize(line);
            assert_eq!(detokenize(&crunched), *line);
            // idempotence modulo normalisation
            assert_eq!(tokenize(&detokenize(&crunched)), crunched);
        }
    }
}
