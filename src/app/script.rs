//! Plain-text event scripts for replaying input sequences.
//!
//! One event per line; `#` starts a comment.
//!
//! ```text
//! motion <dx> <dy> [hip|ads]
//! key <key> down|up
//! press <key>                       # down then up
//! batch <key>:down|up ...
//! focus on|off
//! config <base> <lookX> <lookY> <scopeX> <scopeY> <scale>
//! ```
//!
//! `<key>` is `trigger`, `popup`, a decimal or `0x` hex usage code, or one of
//! `alt`, `ralt`, `ctrl`, `tab`, `esc`, `p`.

use crate::error::{AimlinkError, Result};
use crate::input::{KeyBinding, KeyCode, KeyEdge, KeyEvent, PlatformEvent};
use crate::settings::SensitivityConfig;
use crate::transform::AimState;

/// Parse a whole script into events, resolving `trigger`/`popup` against `binding`.
pub fn parse_script(source: &str, binding: &KeyBinding) -> Result<Vec<PlatformEvent>> {
    let mut events = Vec::new();
    for (index, raw_line) in source.lines().enumerate() {
        let line_no = index + 1;
        let line = raw_line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        parse_line(line, line_no, binding, &mut events)?;
    }
    Ok(events)
}

fn parse_line(
    line: &str,
    line_no: usize,
    binding: &KeyBinding,
    out: &mut Vec<PlatformEvent>,
) -> Result<()> {
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();

    match command {
        "motion" => {
            let (dx, dy, aim) = match args.as_slice() {
                [dx, dy] => (*dx, *dy, AimState::HipFire),
                [dx, dy, aim] => (*dx, *dy, parse_aim(aim, line_no)?),
                _ => return Err(AimlinkError::script(line_no, "usage: motion <dx> <dy> [hip|ads]")),
            };
            out.push(PlatformEvent::Motion {
                dx: parse_number(dx, line_no)?,
                dy: parse_number(dy, line_no)?,
                aim,
            });
        }
        "key" => {
            let [key, edge] = args.as_slice() else {
                return Err(AimlinkError::script(line_no, "usage: key <key> down|up"));
            };
            let code = parse_key(key, binding, line_no)?;
            out.push(PlatformEvent::Key(KeyEvent::new(code, parse_edge(edge, line_no)?)));
        }
        "press" => {
            let [key] = args.as_slice() else {
                return Err(AimlinkError::script(line_no, "usage: press <key>"));
            };
            let code = parse_key(key, binding, line_no)?;
            out.push(PlatformEvent::Key(KeyEvent::down(code)));
            out.push(PlatformEvent::Key(KeyEvent::up(code)));
        }
        "batch" => {
            if args.is_empty() {
                return Err(AimlinkError::script(line_no, "usage: batch <key>:down|up ..."));
            }
            let keys = args
                .iter()
                .map(|arg| {
                    let (key, edge) = arg.split_once(':').ok_or_else(|| {
                        AimlinkError::script(line_no, format!("expected <key>:<edge>, got `{arg}`"))
                    })?;
                    Ok(KeyEvent::new(
                        parse_key(key, binding, line_no)?,
                        parse_edge(edge, line_no)?,
                    ))
                })
                .collect::<Result<Vec<_>>>()?;
            out.push(PlatformEvent::KeyBatch(keys));
        }
        "focus" => {
            let focused = match args.as_slice() {
                ["on"] => true,
                ["off"] => false,
                _ => return Err(AimlinkError::script(line_no, "usage: focus on|off")),
            };
            out.push(PlatformEvent::Focus(focused));
        }
        "config" => {
            let [base, look_x, look_y, scope_x, scope_y, scale] = args.as_slice() else {
                return Err(AimlinkError::script(
                    line_no,
                    "usage: config <base> <lookX> <lookY> <scopeX> <scopeY> <scale>",
                ));
            };
            out.push(PlatformEvent::Config(SensitivityConfig {
                base_axis_sensitivity: parse_number(base, line_no)?,
                look_sensitivity_x: parse_number(look_x, line_no)?,
                look_sensitivity_y: parse_number(look_y, line_no)?,
                scope_sensitivity_x: parse_number(scope_x, line_no)?,
                scope_sensitivity_y: parse_number(scope_y, line_no)?,
                platform_scale: parse_number(scale, line_no)?,
            }));
        }
        other => {
            return Err(AimlinkError::script(
                line_no,
                format!("unknown command `{other}`"),
            ))
        }
    }
    Ok(())
}

fn parse_number<T: std::str::FromStr>(word: &str, line_no: usize) -> Result<T> {
    word.parse()
        .map_err(|_| AimlinkError::script(line_no, format!("invalid number `{word}`")))
}

fn parse_aim(word: &str, line_no: usize) -> Result<AimState> {
    match word {
        "hip" => Ok(AimState::HipFire),
        "ads" | "scoped" => Ok(AimState::Scoped),
        _ => Err(AimlinkError::script(line_no, format!("invalid aim state `{word}`"))),
    }
}

fn parse_edge(word: &str, line_no: usize) -> Result<KeyEdge> {
    match word {
        "down" => Ok(KeyEdge::Down),
        "up" => Ok(KeyEdge::Up),
        _ => Err(AimlinkError::script(line_no, format!("invalid key edge `{word}`"))),
    }
}

fn parse_key(word: &str, binding: &KeyBinding, line_no: usize) -> Result<KeyCode> {
    let code = match word {
        "trigger" => binding.trigger_key(),
        "popup" => binding.popup_toggle_key(),
        "alt" => KeyCode::LEFT_ALT,
        "ralt" => KeyCode::RIGHT_ALT,
        "ctrl" => KeyCode::LEFT_CONTROL,
        "tab" => KeyCode::TAB,
        "esc" => KeyCode::ESCAPE,
        "p" => KeyCode::P,
        _ => {
            let parsed = match word.strip_prefix("0x") {
                Some(hex) => u16::from_str_radix(hex, 16).ok(),
                None => word.parse().ok(),
            };
            KeyCode(parsed.ok_or_else(|| {
                AimlinkError::script(line_no, format!("invalid key `{word}`"))
            })?)
        }
    };
    Ok(code)
}
