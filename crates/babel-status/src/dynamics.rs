//! The `角色动态` section: one replacement snapshot per named character.

use babel_core::{CharacterDynamicData, CharacterDynamics, Percent};

use crate::diagnostics::{Diagnostic, Origin};
use crate::lexer::{self, Field, Line, LineKind};
use crate::scalar::leading_int;
use crate::vocab::{CHARACTER_SECTION, CharacterAttr};

/// Parse the character-dynamics section of a block body.
///
/// Every record starts from [`CharacterDynamicData::placeholder`], so fields
/// a line leaves out are reset rather than inherited. Returns `None` when
/// the section is missing or yields no usable line.
pub fn parse_character_dynamics(body: &str) -> (Option<CharacterDynamics>, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let dynamics = dynamics_from_lines(&lexer::lines(body), &mut diagnostics);
    (dynamics, diagnostics)
}

pub(crate) fn dynamics_from_lines(
    lines: &[Line<'_>],
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<CharacterDynamics> {
    let section = lexer::section(lines, CHARACTER_SECTION)?;
    let mut out = CharacterDynamics::new();

    for line in section {
        let LineKind::Item { fields } = &line.kind else {
            continue;
        };
        let Some((name, attrs)) = fields.split_first() else {
            continue;
        };
        if name.text.is_empty() {
            tracing::warn!(line = line.text, "character line without a name skipped");
            diagnostics.push(Diagnostic::dropped(
                Origin::Characters,
                line.span.clone(),
                "character line has no name",
            ));
            continue;
        }
        if attrs.is_empty() {
            tracing::warn!(name = name.text, "character line without attributes skipped");
            let message = format!("no attributes for `{}`", name.text);
            diagnostics.push(
                Diagnostic::dropped(Origin::Characters, line.span.clone(), message)
                    .with_label("expected `name|key=value|...`"),
            );
            continue;
        }

        let record = character_record(name.text, attrs, diagnostics);
        if out.insert(name.text.to_string(), record).is_some() {
            tracing::debug!(name = name.text, "character listed twice; last line wins");
        }
    }

    (!out.is_empty()).then_some(out)
}

fn character_record(
    name: &str,
    attrs: &[Field<'_>],
    diagnostics: &mut Vec<Diagnostic>,
) -> CharacterDynamicData {
    let mut record = CharacterDynamicData::placeholder();

    for field in attrs {
        let Some((key, value)) = field.text.split_once('=') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        let Some(attr) = CharacterAttr::from_label(key) else {
            continue;
        };
        match attr {
            CharacterAttr::Location => record.location = value.to_string(),
            CharacterAttr::Clothing => record.clothing = value.to_string(),
            CharacterAttr::Activity => record.activity = value.to_string(),
            CharacterAttr::Thought => record.thought = value.to_string(),
            CharacterAttr::Affection => match leading_int(value) {
                Some(n) => record.affection = Percent::clamped(n),
                None => {
                    tracing::warn!(name, value, "unparseable affection; using default");
                    let message = format!("affection for `{name}` is not a number");
                    diagnostics.push(
                        Diagnostic::dropped(Origin::Characters, field.span.clone(), message)
                            .with_label(format!("defaults to {}", record.affection)),
                    );
                }
            },
        }
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use babel_core::character::UNKNOWN;

    #[test]
    fn full_line() {
        let body = "角色动态:\n- 关祁|位置=茶室|穿着=丝绸长衫|行动=泡茶|想法=有趣|好感度=65";
        let (map, diags) = parse_character_dynamics(body);
        assert!(diags.is_empty());
        let map = map.unwrap();
        let guan = &map["关祁"];
        assert_eq!(guan.location, "茶室");
        assert_eq!(guan.clothing, "丝绸长衫");
        assert_eq!(guan.activity, "泡茶");
        assert_eq!(guan.thought, "有趣");
        assert_eq!(guan.affection.value(), 65);
    }

    #[test]
    fn location_only_resets_other_fields() {
        let (map, _) = parse_character_dynamics("角色动态:\n- 埃莉诺|位置=图书馆");
        let record = &map.unwrap()["埃莉诺"];
        assert_eq!(record.location, "图书馆");
        assert_eq!(record.clothing, UNKNOWN);
        assert_eq!(record.activity, UNKNOWN);
        assert_eq!(record.thought, UNKNOWN);
        assert_eq!(record.affection.value(), 50);
    }

    #[test]
    fn attributes_in_any_order_and_unknown_ignored() {
        let (map, _) = parse_character_dynamics("角色动态:\n- 威廉|好感度=80|身高=180|位置=讲台");
        let record = &map.unwrap()["威廉"];
        assert_eq!(record.location, "讲台");
        assert_eq!(record.affection.value(), 80);
    }

    #[test]
    fn affection_clamped_and_defaulted() {
        let body = "角色动态:\n- a|好感度=250\n- b|好感度=-3\n- c|好感度=很多";
        let (map, diags) = parse_character_dynamics(body);
        let map = map.unwrap();
        assert_eq!(map["a"].affection.value(), 100);
        assert_eq!(map["b"].affection.value(), 0);
        assert_eq!(map["c"].affection.value(), 50);
        assert_eq!(diags.len(), 1);
        assert_eq!(&body[diags[0].span.clone()], "好感度=很多");
    }

    #[test]
    fn bad_lines_skipped_rest_kept() {
        let body = "角色动态:\n- |位置=x\n- 孤零零\n- 佩德罗|位置=酒馆";
        let (map, diags) = parse_character_dynamics(body);
        let map = map.unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("佩德罗"));
        assert_eq!(diags.len(), 2);
    }

    #[test]
    fn section_ends_at_next_pair() {
        let body = "角色动态:\n- a|位置=x\n怀疑度: 10\n- b|位置=y";
        let (map, _) = parse_character_dynamics(body);
        let map = map.unwrap();
        assert!(map.contains_key("a"));
        assert!(!map.contains_key("b"));
    }

    #[test]
    fn missing_or_empty_section_is_none() {
        assert_eq!(parse_character_dynamics("时间: 早上").0, None);
        assert_eq!(parse_character_dynamics("角色动态:\n时间: 早上").0, None);
    }

    #[test]
    fn duplicate_name_last_wins() {
        let (map, _) = parse_character_dynamics("角色动态:\n- a|位置=x\n- a|位置=y");
        assert_eq!(map.unwrap()["a"].location, "y");
    }

    #[test]
    fn value_may_contain_equals() {
        let (map, _) = parse_character_dynamics("角色动态:\n- a|想法=1+1=2");
        assert_eq!(map.unwrap()["a"].thought, "1+1=2");
    }
}
