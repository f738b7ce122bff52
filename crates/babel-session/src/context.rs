//! What the narrator is told besides the player's message: a window of
//! recent conversation and a snapshot of the current game state.

use babel_core::{GameState, Message};

use crate::config::SessionConfig;
use crate::transport::{ChatRole, ChatTurn};

/// Header line of the state snapshot.
pub const STATE_HEADER: &str = "=== 当前游戏状态 / CURRENT GAME STATE ===";

const STATE_FOOTER: &str = "【重要】LLM必须在上述数值基础上进行增减，好感度单次变化限制为±1！";

/// Render the state snapshot appended to the system instruction.
///
/// Lists the profile, the three stats and each character's affection,
/// location and activity so the narrator adjusts from current values.
pub fn render_state_context(state: &GameState) -> String {
    let p = &state.profile;
    let s = &state.stats;
    let mut out = String::new();

    out.push_str(STATE_HEADER);
    out.push('\n');
    out.push_str(&format!(
        "时间: {}\n地点: {}\n天气: {}\n玩家银币: {}\n",
        p.time, p.location, p.weather, p.coins
    ));
    out.push_str(&format!(
        "帝国贡献: {}\n社团声望: {}\n怀疑度: {}\n",
        s.empire_contribution, s.club_contribution, s.suspicion
    ));
    out.push('\n');
    out.push_str("主要角色当前状态:\n");
    for (name, d) in &state.character_dynamics {
        out.push_str(&format!(
            "- {name}: 好感度={}, 位置={}, 行动={}\n",
            d.affection, d.location, d.activity
        ));
    }
    out.push('\n');
    out.push_str(STATE_FOOTER);
    out
}

/// Join lore context and the state snapshot.
pub fn dynamic_context(world_info: &str, state: &GameState) -> String {
    format!("{world_info}\n\n{}", render_state_context(state))
}

/// Select the history sent with a turn.
///
/// Takes the last `max_history_messages` messages, then keeps the newest
/// ones whose combined length fits `max_history_chars`, stopping at the
/// first message that would overflow. Returned oldest first.
pub fn history_window(messages: &[Message], config: &SessionConfig) -> Vec<ChatTurn> {
    let start = messages.len().saturating_sub(config.max_history_messages);
    let mut used = 0usize;
    let mut window: Vec<ChatTurn> = Vec::new();

    for msg in messages[start..].iter().rev() {
        let len = msg.content.chars().count();
        if used + len > config.max_history_chars {
            break;
        }
        used += len;
        window.push(ChatTurn {
            role: ChatRole::from(msg.role),
            content: msg.content.clone(),
        });
    }
    window.reverse();

    tracing::debug!(
        considered = messages.len() - start,
        kept = window.len(),
        chars = used,
        "history window"
    );
    window
}
