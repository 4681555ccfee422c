//! Tokenizer for the restricted expression grammar.

#[derive(Debug, Clone, PartialEq)]
pub enum Tok {
    Num(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    Comma,
}

pub fn lex(src: &str) -> Result<Vec<Tok>, String> {
    let mut tokens = Vec::new();
    let mut chars = src.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            '+' => {
                chars.next();
                tokens.push(Tok::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Tok::Minus);
            }
            '*' => {
                chars.next();
                // Accept `**` as an exponent spelling alongside `^`.
                if matches!(chars.peek(), Some((_, '*'))) {
                    chars.next();
                    tokens.push(Tok::Caret);
                } else {
                    tokens.push(Tok::Star);
                }
            }
            '/' => {
                chars.next();
                tokens.push(Tok::Slash);
            }
            '^' => {
                chars.next();
                tokens.push(Tok::Caret);
            }
            '(' => {
                chars.next();
                tokens.push(Tok::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Tok::RParen);
            }
            ',' => {
                chars.next();
                tokens.push(Tok::Comma);
            }
            c if c.is_ascii_digit() || c == '.' => {
                let mut end = start;
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_ascii_digit() || c == '.' {
                        end = i + c.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let slice = &src[start..end];
                let value = slice
                    .parse::<f64>()
                    .map_err(|_| format!("bad number '{}'", slice))?;
                tokens.push(Tok::Num(value));
            }
            c if c.is_ascii_alphabetic() => {
                let mut end = start;
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        end = i + c.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Tok::Ident(src[start..end].to_string()));
            }
            other => return Err(format!("unexpected character '{}'", other)),
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_operators_and_numbers() {
        let tokens = lex("3.5 * x ^ 2 - 1").unwrap();
        assert_eq!(
            tokens,
            vec![
                Tok::Num(3.5),
                Tok::Star,
                Tok::Ident("x".to_string()),
                Tok::Caret,
                Tok::Num(2.0),
                Tok::Minus,
                Tok::Num(1.0),
            ]
        );
    }

    #[test]
    fn double_star_is_exponent() {
        assert_eq!(lex("x**2").unwrap()[1], Tok::Caret);
    }

    #[test]
    fn rejects_unknown_characters() {
        assert!(lex("x $ 2").is_err());
        assert!(lex("x = 2").is_err());
    }
}
