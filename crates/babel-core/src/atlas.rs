//! Map locations and free-text location matching.
//!
//! The narrator reports locations as prose ("巴别塔-教室前排", "金狮茶室的
//! 角落"). [`match_location`] maps such text onto one of the fixed map
//! markers so the map surface can place the player and characters.

use crate::character::CharacterDynamics;

/// A marker on the Oxford map. Coordinates are percentages of the map size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapLocation {
    /// Canonical name.
    pub key: &'static str,
    /// Alternative names that also match.
    pub aliases: &'static [&'static str],
    /// Horizontal position (0-100).
    pub x: u8,
    /// Vertical position (0-100).
    pub y: u8,
}

const fn loc(key: &'static str, aliases: &'static [&'static str], x: u8, y: u8) -> MapLocation {
    MapLocation { key, aliases, x, y }
}

/// Every map marker. Earlier entries win when text matches several.
pub const WORLD_LOCATIONS: &[MapLocation] = &[
    loc(
        "巴别塔",
        &[
            "巴别塔",
            "教室",
            "参考资料室",
            "教授办公室",
            "文学系",
            "文学部",
            "口译部",
            "法务部",
            "刻银部",
            "大堂",
            "Babel Tower",
            "教室楼层",
        ],
        70,
        50,
    ),
    loc(
        "巴别塔学舍",
        &["的宿舍", "的房间", "的卧室", "的寝室", "宿舍", "学生宿舍", "dormitory"],
        50,
        50,
    ),
    loc("诺曼庄园", &["诺曼庄园", "诺曼家", "Norman Manor", "庄园"], 15, 15),
    loc("牛津辩论社", &["辩论社", "辩论厅", "Oxford Union"], 75, 75),
    loc("博德利图书馆", &["博德利图书馆", "图书馆", "Bodleian Library"], 85, 65),
    loc("拉德克利夫医学院", &["医学院", "医院", "Radcliffe Infirmary"], 70, 80),
    loc("阿什莫林博物馆", &["博物馆", "展厅", "Ashmolean Museum"], 55, 40),
    loc("大学公园长椅", &["长椅", "公园", "University Parks"], 75, 20),
    loc("植物园", &["植物园", "花园", "温室", "Botanic Garden"], 90, 25),
    loc("艾西斯河船屋", &["船屋", "艾西斯河", "Isis River", "Thames"], 65, 30),
    loc("波特草甸", &["波特草甸", "草甸", "Port Meadow"], 75, 15),
    loc("科莱特的私人沙龙", &["私人沙龙", "科莱特的", "salon"], 40, 35),
    loc("金狮茶室", &["茶室", "老地方", "Golden Lion Tea Room"], 45, 25),
    loc("公牛与熊酒馆", &["酒馆", "酒吧", "Bull and Bear", "pub"], 45, 90),
    loc("学生膳堂", &["膳堂", "食堂", "餐厅", "Dining Hall"], 50, 60),
    loc("谢尔登大剧院", &["剧院", "歌剧院", "Sheldonian Theatre"], 45, 45),
    loc("布莱克威尔旧书店", &["书店", "布莱克威尔", "Blackwell's"], 60, 75),
    loc("德罗切尔夫人高级定制店", &["服装店", "裁缝店", "试衣间", "Madame Drochel"], 50, 45),
    loc("牛津室内市场", &["市场", "集市", "商店", "Covered Market"], 37, 80),
    loc("牛津邮局与电报局", &["邮局", "电报局", "Post Office"], 10, 90),
    loc("牛津火车站", &["车站", "站台", "Train Station"], 25, 80),
    loc("工业区工厂", &["工厂", "厂房", "工业区", "贫民区", "Factory District"], 15, 55),
    loc("黑市巷", &["黑市", "走私点", "Black Market"], 25, 60),
    loc("牛津城堡监狱", &["监狱", "地牢", "审讯室", "Oxford Castle", "Prison"], 90, 50),
    loc("圣墓公墓", &["公墓", "墓地", "墓碑", "Cemetery"], 37, 25),
];

/// Find the map marker a piece of location text refers to.
///
/// The canonical key matches by containment; aliases match by containment
/// either verbatim or case-insensitively.
pub fn match_location(text: &str) -> Option<&'static MapLocation> {
    if text.is_empty() {
        return None;
    }
    let lower = text.to_lowercase();
    WORLD_LOCATIONS.iter().find(|loc| {
        text.contains(loc.key)
            || loc
                .aliases
                .iter()
                .any(|alias| text.contains(alias) || lower.contains(&alias.to_lowercase()))
    })
}

/// Place every character whose location resolves to a marker.
///
/// Characters at unknown places are left off the map.
pub fn place_characters(dynamics: &CharacterDynamics) -> Vec<(&str, &'static MapLocation)> {
    dynamics
        .iter()
        .filter_map(|(name, data)| match_location(&data.location).map(|l| (name.as_str(), l)))
        .collect()
}
