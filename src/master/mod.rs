//! master data: fixed code -> label vocabularies for the enumerated
//! fields of a betting record
//!
//! every table starts w/ the sentinel `NO_SELECTION_ID` and lists the
//! remaining codes in authored order

/// code meaning "nothing selected"; valid for optional fields only
pub const NO_SELECTION_ID : u32 = 0;
pub const NO_SELECTION_LABEL : &str = "選択なし";

/// a code -> label table
pub type Table = &'static [(u32, &'static str)];

/// one selectable entry, as offered by the prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumItem {
    pub id: u32,
    pub name: &'static str,
}

/// the tables' entries in table order (which is not necessarily numeric;
/// sort the result if that matters)
pub fn to_list(table : Table) -> Vec<EnumItem>
{
    table.iter().map(|&(id, name)| EnumItem { id, name }).collect()
}

/// label for `code`, `None` if the table doesn't know it
pub fn label(table : Table, code : u32) -> Option<&'static str>
{
    table.iter().find(|&&(id, _)| id == code).map(|&(_, name)| name)
}

pub fn contains(table : Table, code : u32) -> bool
{
    label(table, code).is_some()
}

/// label for display; unknown codes are shown as the bare number
pub fn display(table : Table, code : u32) -> String
{
    label(table, code).map_or_else(|| code.to_string(), str::to_string)
}

// 競馬場
pub const RACE_COURSES : Table = &[
    (NO_SELECTION_ID, NO_SELECTION_LABEL),
    (1, "札幌"), (2, "函館"), (3, "福島"), (4, "新潟"),
    (5, "東京"), (6, "中山"), (7, "中京"), (8, "京都"),
    (9, "阪神"), (10, "小倉"),
    // local (NAR) tracks
    (11, "門別"), (12, "帯広(ばんえい)"), (13, "盛岡"), (14, "水沢"),
    (15, "浦和"), (16, "船橋"), (17, "大井"), (18, "川崎"),
    (19, "金沢"), (20, "笠松"), (21, "名古屋"), (22, "園田"),
    (23, "姫路"), (24, "高知"), (25, "佐賀"),
    // overseas
    (99, "海外"),
];

// レース番号
pub const RACE_NUMBERS : Table = &[
    (NO_SELECTION_ID, NO_SELECTION_LABEL),
    (1, "1R"),
    (2, "2R"),
    (3, "3R"),
    (4, "4R"),
    (5, "5R"),
    (6, "6R"),
    (7, "7R"),
    (8, "8R"),
    (9, "9R"),
    (10, "10R"),
    (11, "11R"),
    (12, "12R"),
];

// 芝 / ダート
pub const SURFACES : Table = &[
    (NO_SELECTION_ID, NO_SELECTION_LABEL),
    (1, "芝"), (2, "ダート"), (3, "障害"),
];

// codes are the distance in meters
pub const DISTANCES : Table = &[
    (NO_SELECTION_ID, NO_SELECTION_LABEL),
    (1000, "1000m"), (1200, "1200m"), (1300, "1300m"), (1400, "1400m"),
    (1500, "1500m"), (1600, "1600m"), (1700, "1700m"), (1800, "1800m"),
    (2000, "2000m"), (2200, "2200m"), (2400, "2400m"), (2500, "2500m"),
    (3000, "3000m"), (3200, "3200m"), (3600, "3600m"),
];

// クラス
pub const RACE_CLASSES : Table = &[
    (NO_SELECTION_ID, NO_SELECTION_LABEL),
    (1, "新馬"), (2, "未勝利"), (3, "1勝クラス"), (4, "2勝クラス"),
    (5, "3勝クラス"), (6, "オープン(L)"), (7, "オープン(OP)"),
    (8, "G3"), (9, "G2"), (10, "G1"),
    (11, "平場（地方）"), (12, "重賞（地方）"), (13, "交流重賞（地方）"),
];

// 券種
pub const BET_TYPES : Table = &[
    (NO_SELECTION_ID, NO_SELECTION_LABEL),
    (1, "単勝"), (2, "複勝"), (3, "枠連"), (4, "馬連"),
    (5, "ワイド"), (6, "馬単"), (7, "3連複"), (8, "3連単"), (9, "WIN5"),
];

// 頭数
pub const FIELD_SIZES : Table = &[
    (NO_SELECTION_ID, NO_SELECTION_LABEL),
    (2, "2頭"), (3, "3頭"), (4, "4頭"), (5, "5頭"), (6, "6頭"), (7, "7頭"),
    (8, "8頭"), (9, "9頭"), (10, "10頭"), (11, "11頭"), (12, "12頭"), (13, "13頭"),
    (14, "14頭"), (15, "15頭"), (16, "16頭"), (17, "17頭"), (18, "18頭"), (19, "19頭"),
    (20, "20頭"), (21, "21頭"), (22, "22頭"), (23, "23頭"), (24, "24頭"), (25, "25頭"),
    (26, "26頭"), (27, "27頭"), (28, "28頭"), (29, "29頭"), (30, "30頭"), (31, "31頭"),
    (32, "32頭"), (33, "33頭"), (34, "34頭"), (35, "35頭"), (36, "36頭"), (37, "37頭"),
    (38, "38頭"), (39, "39頭"), (40, "40頭"),
];
