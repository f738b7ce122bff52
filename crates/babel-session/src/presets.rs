//! Player inputs generated by the schedule planner and the quest board.

/// Input for a schedule choice: `【日程安排】slot：action - sub`.
///
/// The sub-action suffix is omitted when `sub_action` is `None` or blank.
pub fn schedule_action(slot: &str, action: &str, sub_action: Option<&str>) -> String {
    match sub_action.map(str::trim).filter(|s| !s.is_empty()) {
        Some(sub) => format!("【日程安排】{slot}：{action} - {sub}"),
        None => format!("【日程安排】{slot}：{action}"),
    }
}

/// Input for accepting a quest: `【接受任务】部门：d，任务ID：id`.
pub fn quest_action(department: &str, task_id: &str) -> String {
    format!("【接受任务】部门：{department}，任务ID：{task_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_with_and_without_sub() {
        assert_eq!(
            schedule_action("上午", "上课", Some("语音学")),
            "【日程安排】上午：上课 - 语音学"
        );
        assert_eq!(schedule_action("晚上", "休息", None), "【日程安排】晚上：休息");
        assert_eq!(schedule_action("晚上", "休息", Some("  ")), "【日程安排】晚上：休息");
    }

    #[test]
    fn quest() {
        assert_eq!(quest_action("翻译部", "T-07"), "【接受任务】部门：翻译部，任务ID：T-07");
    }
}
