//! Codificación de valores numéricos en payloads (texto decimal UTF-8).

/// Interpreta el payload como un `f64` en texto decimal. Se ignoran espacios
/// y saltos de línea alrededor del número.
///
/// Acepta la misma gramática que `Double.parseDouble`: signo opcional,
/// exponente `e`/`E`, sufijo `d`/`D`/`f`/`F`, y las palabras `NaN` e
/// `Infinity` (sensibles a mayúsculas). Los literales hexadecimales no se
/// aceptan.
pub fn parse_numeric(payload: &[u8]) -> Option<f64> {
    let text = std::str::from_utf8(payload).ok()?.trim();
    let (negative, body) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let value = match body {
        "NaN" => f64::NAN,
        "Infinity" => f64::INFINITY,
        _ => {
            let digits = body.strip_suffix(['d', 'D', 'f', 'F']).unwrap_or(body);
            if !digits.starts_with(|c: char| c.is_ascii_digit() || c == '.')
               || !digits.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-')) {
                return None;
            }
            digits.parse::<f64>().ok()?
        }
    };
    Some(if negative { -value } else { value })
}

/// Forma decimal de `value`, con el formato de `Double.toString`:
/// - `NaN`, `Infinity`, `-Infinity` para los no finitos;
/// - notación plana con al menos un decimal si `1e-3 <= |value| < 1e7`
///   (`5.0`, no `5`);
/// - notación científica `d.dddE±n` fuera de ese rango (`1.0E-5`).
pub fn format_decimal(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        let text = value.to_string();
        return if text.contains('.') { text } else { format!("{text}.0") };
    }

    let sci = format!("{value:e}");
    match sci.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => format!("{mantissa}E{exponent}"),
        Some((mantissa, exponent)) => format!("{mantissa}.0E{exponent}"),
        None => sci,
    }
}
