//! Message formatting for format-args log calls
//!
//! Three shapes are recognized:
//! - template and arguments: printf-style substitution
//! - arguments only: the arguments' string forms concatenated
//! - template only: the template verbatim, `%` sequences included
//!
//! Supported verbs are `%v %s %d %b %o %x %X %c %q %e %E %f %F %g %G %t` and
//! `%%`, with the flags `- + # 0 space`, a width and a precision. A verb that
//! does not fit its argument, a missing argument or a surplus argument is
//! rendered inline (`%!d(string=x)`, `%!s(MISSING)`, `%!(EXTRA int=3)`)
//! rather than failing the log call.

use super::fields::FieldValue;
use std::iter::Peekable;
use std::str::Chars;

/// Build the `msg` value from a template and its arguments
///
/// # Examples
///
/// ```
/// use rust_log_facade::core::format_message;
/// use rust_log_facade::FieldValue;
///
/// assert_eq!(format_message("count=%d", &[FieldValue::from(3)]), "count=3");
/// assert_eq!(format_message("", &["x".into(), "y".into()]), "xy");
/// assert_eq!(format_message("100%", &[]), "100%");
/// ```
pub fn format_message(template: &str, args: &[FieldValue]) -> String {
    if args.is_empty() {
        template.to_string()
    } else if template.is_empty() {
        sprint(args)
    } else {
        sprintf(template, args)
    }
}

/// Concatenate argument string forms; a space separates two adjacent
/// operands only when neither is a string.
pub fn sprint(args: &[FieldValue]) -> String {
    let mut out = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 && !arg.is_string() && !args[i - 1].is_string() {
            out.push(' ');
        }
        out.push_str(&arg.to_string());
    }
    out
}

#[derive(Debug, Default)]
struct Spec {
    minus: bool,
    plus: bool,
    sharp: bool,
    zero: bool,
    space: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

/// Largest accepted width or precision
const MAX_WIDTH: usize = 1_000_000;

/// printf-style substitution of `args` into `template`
pub fn sprintf(template: &str, args: &[FieldValue]) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut chars = template.chars().peekable();
    let mut next_arg = 0;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let mut spec = Spec::default();
        while let Some(&flag) = chars.peek() {
            match flag {
                '-' => spec.minus = true,
                '+' => spec.plus = true,
                '#' => spec.sharp = true,
                '0' => spec.zero = true,
                ' ' => spec.space = true,
                _ => break,
            }
            chars.next();
        }
        spec.width = parse_number(&mut chars);
        if spec.width.is_some_and(|w| w > MAX_WIDTH) {
            out.push_str("%!(BADWIDTH)");
            spec.width = None;
        }
        if chars.peek() == Some(&'.') {
            chars.next();
            spec.precision = Some(parse_number(&mut chars).unwrap_or(0));
            if spec.precision.is_some_and(|p| p > MAX_WIDTH) {
                out.push_str("%!(BADPREC)");
                spec.precision = None;
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

        match args.get(next_arg) {
            Some(arg) => {
                next_arg += 1;
                out.push_str(&format_arg(verb, &spec, arg));
            }
            None => {
                out.push_str("%!");
                out.push(verb);
                out.push_str("(MISSING)");
            }
        }
    }

    if next_arg < args.len() {
        let extra = args[next_arg..]
            .iter()
            .map(describe)
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str("%!(EXTRA ");
        out.push_str(&extra);
        out.push(')');
    }

    out
}

fn parse_number(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(digit as usize));
        chars.next();
    }
    value
}

fn describe(arg: &FieldValue) -> String {
    match arg {
        FieldValue::Null => "<nil>".to_string(),
        other => format!("{}={}", other.type_name(), other),
    }
}

fn bad_verb(verb: char, arg: &FieldValue) -> String {
    format!("%!{}({})", verb, describe(arg))
}

fn format_arg(verb: char, spec: &Spec, arg: &FieldValue) -> String {
    match (verb, arg) {
        ('v' | 'd', FieldValue::Int(i)) => pad_number(spec, *i < 0, "", &i.unsigned_abs().to_string()),
        ('v' | 'd', FieldValue::UInt(u)) => pad_number(spec, false, "", &u.to_string()),
        ('b' | 'o' | 'x' | 'X', FieldValue::Int(i)) => radix(spec, verb, *i < 0, i.unsigned_abs()),
        ('b' | 'o' | 'x' | 'X', FieldValue::UInt(u)) => radix(spec, verb, false, *u),
        ('c', FieldValue::Int(_) | FieldValue::UInt(_)) => pad_text(spec, &to_char(arg).to_string()),
        ('q', FieldValue::Int(_) | FieldValue::UInt(_)) => pad_text(spec, &format!("{:?}", to_char(arg))),
        ('v' | 'e' | 'E' | 'f' | 'F' | 'g' | 'G', FieldValue::Float(f)) => format_float(verb, spec, *f),
        ('v', FieldValue::String(s)) if spec.sharp => pad_text(spec, &format!("{:?}", s)),
        ('v' | 's', FieldValue::String(s)) => pad_text(spec, truncate(s, spec.precision)),
        ('q', FieldValue::String(s)) => pad_text(spec, &format!("{:?}", s)),
        ('x' | 'X', FieldValue::String(s)) => {
            let hex: String = s
                .bytes()
                .map(|b| if verb == 'x' { format!("{:02x}", b) } else { format!("{:02X}", b) })
                .collect();
            pad_text(spec, &hex)
        }
        ('v' | 't', FieldValue::Bool(b)) => pad_text(spec, if *b { "true" } else { "false" }),
        ('v', FieldValue::Null) => pad_text(spec, "<nil>"),
        _ => bad_verb(verb, arg),
    }
}

fn to_char(arg: &FieldValue) -> char {
    let code = match arg {
        FieldValue::Int(i) => u32::try_from(*i).ok(),
        FieldValue::UInt(u) => u32::try_from(*u).ok(),
        _ => None,
    };
    code.and_then(char::from_u32).unwrap_or(char::REPLACEMENT_CHARACTER)
}

fn truncate(s: &str, precision: Option<usize>) -> &str {
    match precision.and_then(|p| s.char_indices().nth(p)) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn radix(spec: &Spec, verb: char, negative: bool, magnitude: u64) -> String {
    let (prefix, body) = match verb {
        'b' => ("0b", format!("{:b}", magnitude)),
        'o' => ("0", format!("{:o}", magnitude)),
        'x' => ("0x", format!("{:x}", magnitude)),
        _ => ("0X", format!("{:X}", magnitude)),
    };
    let prefix = if spec.sharp { prefix } else { "" };
    pad_number(spec, negative, prefix, &body)
}

fn format_float(verb: char, spec: &Spec, value: f64) -> String {
    if value.is_nan() {
        return pad_text(&Spec { zero: false, ..*spec }, "NaN");
    }
    if value.is_infinite() {
        let text = if value < 0.0 { "-Inf" } else { "+Inf" };
        return pad_text(&Spec { zero: false, ..*spec }, text);
    }

    let negative = value.is_sign_negative() && value != 0.0;
    let abs = value.abs();
    let body = match verb {
        'f' | 'F' => format!("{:.*}", spec.precision.unwrap_or(6), abs),
        'e' | 'E' => exponent_form(abs, spec.precision.unwrap_or(6), verb == 'E'),
        _ => general_form(abs, spec.precision, verb == 'G'),
    };
    pad_number(spec, negative, "", &body)
}

fn exponent_form(abs: f64, precision: usize, upper: bool) -> String {
    fix_exponent(&format!("{:.*e}", precision, abs), upper)
}

/// Rewrite Rust's `1.5e-7` exponent into the signed two-digit `1.5e-07` form
fn fix_exponent(raw: &str, upper: bool) -> String {
    let (mantissa, exp) = raw.split_once('e').unwrap_or((raw, "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    format!(
        "{}{}{}{:02}",
        mantissa,
        if upper { 'E' } else { 'e' },
        if exp < 0 { '-' } else { '+' },
        exp.abs()
    )
}

fn general_form(abs: f64, precision: Option<usize>, upper: bool) -> String {
    match precision {
        None => {
            if abs != 0.0 && !(1e-4..1e21).contains(&abs) {
                fix_exponent(&format!("{:e}", abs), upper)
            } else {
                format!("{}", abs)
            }
        }
        Some(p) => {
            let p = p.max(1);
            if abs == 0.0 {
                return "0".to_string();
            }
            // Exponent after rounding to p significant digits
            let raw = format!("{:.*e}", p - 1, abs);
            let (mantissa, rest) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
            let exp: i32 = rest.parse().unwrap_or(0);
            if exp < -4 || exp >= p as i32 {
                fix_exponent(&format!("{}e{}", trim_zeros(mantissa), rest), upper)
            } else {
                let decimals = (p as i32 - 1 - exp).max(0) as usize;
                trim_zeros(&format!("{:.*}", decimals, abs)).to_string()
            }
        }
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

fn pad_number(spec: &Spec, negative: bool, prefix: &str, body: &str) -> String {
    let sign = if negative {
        "-"
    } else if spec.plus {
        "+"
    } else if spec.space {
        " "
    } else {
        ""
    };
    let len = sign.len() + prefix.len() + body.chars().count();
    match spec.width {
        Some(width) if width > len => {
            let fill = width - len;
            if spec.minus {
                format!("{}{}{}{}", sign, prefix, body, " ".repeat(fill))
            } else if spec.zero {
                format!("{}{}{}{}", sign, prefix, "0".repeat(fill), body)
            } else {
                format!("{}{}{}{}", " ".repeat(fill), sign, prefix, body)
            }
        }
        _ => format!("{}{}{}", sign, prefix, body),
    }
}

fn pad_text(spec: &Spec, text: &str) -> String {
    let len = text.chars().count();
    match spec.width {
        Some(width) if width > len => {
            let fill = width - len;
            if spec.minus {
                format!("{}{}", text, " ".repeat(fill))
            } else if spec.zero {
                format!("{}{}", "0".repeat(fill), text)
            } else {
                format!("{}{}", " ".repeat(fill), text)
            }
        }
        _ => text.to_string(),
    }
}
