//! printf 风格的格式化
//!
//! 支持的动词：`%v %s %q %d %i %x %X %o %b %c %f %F %e %E %g %G %t %%`，
//! 以及 `- + 0 空格 #` 标志、宽度和精度。参数类型不匹配、缺少或多余时
//! 在结果中内联标注（`%!d(string=abc)`、`%!d(MISSING)`、`%!(EXTRA ...)`），不会失败。
//! 宽度或精度超过上限时标注 `%!(BADWIDTH)` / `%!(BADPREC)` 并按未指定处理。

use crate::log::message::Arg;
use serde_json::Value;
use std::fmt::Write;
use std::iter::Peekable;
use std::str::Chars;

/// 宽度和精度的上限
const MAX_COUNT: usize = 10_000;

/// 文本中是否包含格式化指令
pub fn has_directive(text: &str) -> bool {
    text.contains('%')
}

#[derive(Debug, Default)]
struct Directive {
    minus: bool,
    plus: bool,
    zero: bool,
    space: bool,
    sharp: bool,
    width: usize,
    precision: Option<usize>,
}

enum Num {
    Int(i128),
    Float(f64),
}

/// 按模板格式化参数
pub fn sprintf(template: &str, args: &[Arg]) -> String {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut used = 0;
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let mut directive = Directive::default();
        while let Some(&flag) = chars.peek() {
            match flag {
                '-' => directive.minus = true,
                '+' => directive.plus = true,
                '0' => directive.zero = true,
                ' ' => directive.space = true,
                '#' => directive.sharp = true,
                _ => break,
            }
            chars.next();
        }
        match parse_count(&mut chars) {
            Some(width) => directive.width = width,
            None => out.push_str("%!(BADWIDTH)"),
        }
        if chars.peek() == Some(&'.') {
            chars.next();
            match parse_count(&mut chars) {
                Some(precision) => directive.precision = Some(precision),
                None => out.push_str("%!(BADPREC)"),
            }
        }

        let Some(verb) = chars.next() else {
            out.push_str("%!(NOVERB)");
            break;
        };
        if verb == '%' {
            out.push('%');
            continue;
        }

        match args.get(used) {
            Some(arg) => {
                used += 1;
                match format_arg(verb, &directive, arg) {
                    Some(formatted) => out.push_str(&formatted),
                    None => {
                        let _ = write!(out, "%!{}({}={})", verb, arg.type_name(), arg);
                    }
                }
            }
            None => {
                let _ = write!(out, "%!{}(MISSING)", verb);
            }
        }
    }

    if used < args.len() {
        out.push_str("%!(EXTRA ");
        let extra: Vec<String> = args[used..]
            .iter()
            .map(|arg| format!("{}={}", arg.type_name(), arg))
            .collect();
        out.push_str(&extra.join(", "));
        out.push(')');
    }

    out
}

/// 读取连续的数字，超过 `MAX_COUNT` 时返回 None（数字仍被消费）
fn parse_count(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut count = Some(0usize);
    while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
        count = count
            .and_then(|n| n.checked_mul(10))
            .and_then(|n| n.checked_add(d as usize))
            .filter(|n| *n <= MAX_COUNT);
        chars.next();
    }
    count
}

/// 格式化单个参数，动词与类型不匹配时返回 None
fn format_arg(verb: char, directive: &Directive, arg: &Arg) -> Option<String> {
    match verb {
        'v' | 's' => {
            let mut text = arg.to_string();
            if let (Some(precision), Arg::Text(_)) = (directive.precision, arg) {
                text = text.chars().take(precision).collect();
            }
            Some(pad(text, directive, false))
        }
        'q' => {
            let quoted = match arg {
                Arg::Text(s) => serde_json::to_string(s).ok()?,
                Arg::Value(v) => serde_json::to_string(&v.to_string()).ok()?,
            };
            Some(pad(quoted, directive, false))
        }
        't' => match arg {
            Arg::Value(Value::Bool(b)) => Some(pad(b.to_string(), directive, false)),
            _ => None,
        },
        'd' | 'i' => match number(arg)? {
            Num::Int(n) => {
                let body = signed(n < 0, n.unsigned_abs().to_string(), directive);
                Some(pad(body, directive, true))
            }
            Num::Float(_) => None,
        },
        'x' | 'X' | 'o' | 'b' => {
            let body = match arg {
                Arg::Text(s) if matches!(verb, 'x' | 'X') => {
                    s.bytes().map(|b| format!("{:02x}", b)).collect::<String>()
                }
                _ => match number(arg)? {
                    Num::Int(n) => {
                        let magnitude = n.unsigned_abs();
                        let digits = match verb {
                            'x' | 'X' => format!("{:x}", magnitude),
                            'o' => format!("{:o}", magnitude),
                            _ => format!("{:b}", magnitude),
                        };
                        let prefix = match (directive.sharp, verb) {
                            (true, 'x' | 'X') => "0x",
                            (true, 'o') => "0",
                            (true, 'b') => "0b",
                            _ => "",
                        };
                        signed(n < 0, format!("{}{}", prefix, digits), directive)
                    }
                    Num::Float(_) => return None,
                },
            };
            let body = if verb == 'X' { body.to_uppercase() } else { body };
            Some(pad(body, directive, true))
        }
        'c' => match number(arg)? {
            Num::Int(n) => {
                let c = u32::try_from(n)
                    .ok()
                    .and_then(char::from_u32)
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                Some(pad(c.to_string(), directive, false))
            }
            Num::Float(_) => None,
        },
        'f' | 'F' | 'e' | 'E' | 'g' | 'G' => match number(arg)? {
            Num::Float(f) => {
                let magnitude = f.abs();
                let body = match verb {
                    'f' | 'F' => format!("{:.*}", directive.precision.unwrap_or(6), magnitude),
                    'e' | 'E' => exponent(magnitude, directive.precision.unwrap_or(6)),
                    _ => general(magnitude, directive.precision),
                };
                let body = if verb.is_ascii_uppercase() {
                    body.to_uppercase()
                } else {
                    body
                };
                Some(pad(signed(f.is_sign_negative(), body, directive), directive, true))
            }
            Num::Int(_) => None,
        },
        _ => None,
    }
}

fn number(arg: &Arg) -> Option<Num> {
    match arg {
        Arg::Value(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Some(Num::Int(i as i128))
            } else if let Some(u) = n.as_u64() {
                Some(Num::Int(u as i128))
            } else {
                n.as_f64().map(Num::Float)
            }
        }
        _ => None,
    }
}

fn signed(negative: bool, body: String, directive: &Directive) -> String {
    if negative {
        format!("-{}", body)
    } else if directive.plus {
        format!("+{}", body)
    } else if directive.space {
        format!(" {}", body)
    } else {
        body
    }
}

/// 按宽度填充，数字在符号和前缀之后补零
fn pad(body: String, directive: &Directive, numeric: bool) -> String {
    let len = body.chars().count();
    if len >= directive.width {
        return body;
    }
    let fill = directive.width - len;

    if directive.minus {
        return format!("{}{}", body, " ".repeat(fill));
    }
    if directive.zero && numeric {
        let sign_len = body
            .chars()
            .take_while(|c| matches!(c, '+' | '-' | ' '))
            .count();
        let prefix_len = if body[sign_len..].starts_with("0x") || body[sign_len..].starts_with("0b")
        {
            sign_len + 2
        } else {
            sign_len
        };
        return format!("{}{}{}", &body[..prefix_len], "0".repeat(fill), &body[prefix_len..]);
    }
    format!("{}{}", " ".repeat(fill), body)
}

/// `d.dddddde±XX` 形式
fn exponent(value: f64, precision: usize) -> String {
    let formatted = format!("{:.*e}", precision, value);
    normalize_exponent(&formatted)
}

/// Rust 的 `1.5e3` 改写为 `1.5e+03`
fn normalize_exponent(formatted: &str) -> String {
    match formatted.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.abs())
        }
        None => formatted.to_string(),
    }
}

/// `%g`：指数小于 -4 或不小于精度时使用科学计数法，并去掉多余的零
fn general(value: f64, precision: Option<usize>) -> String {
    let Some(precision) = precision else {
        let shortest = format!("{:e}", value);
        let exp = exponent_of(&shortest);
        return if exp < -4 || exp >= 21 {
            normalize_exponent(&shortest)
        } else {
            format!("{}", value)
        };
    };

    let precision = precision.max(1);
    let sci = format!("{:.*e}", precision - 1, value);
    let exp = exponent_of(&sci);
    if exp < -4 || exp >= precision as i32 {
        let (mantissa, _) = sci.split_once('e').unwrap_or((&sci, "0"));
        normalize_exponent(&format!("{}e{}", trim_zeros(mantissa), exp))
    } else {
        let decimals = (precision as i32 - 1 - exp).max(0) as usize;
        trim_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn exponent_of(sci: &str) -> i32 {
    sci.split_once('e')
        .and_then(|(_, exp)| exp.parse().ok())
        .unwrap_or(0)
}

fn trim_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
