//! The 214 Kangxi radicals and the variant-equivalence tables used to fold
//! graphically distinct radical forms onto one canonical representative.
//!
//! All tables are immutable. The reverse lookups are built once on first use.
//! Anyone resolving components independently must use these exact tables to
//! reproduce the same `comp` values.

use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

use serde::Serialize;

pub const RADICAL_COUNT: usize = 214;

/// First radical index of each stroke-count band. Band `k` (1-based) holds
/// the radicals written with `k` strokes; the last band starts at 214.
pub const STROKE_GROUP_STARTS: [u8; 17] = [
    1, 7, 30, 61, 95, 118, 147, 167, 176, 187, 195, 201, 205, 209, 211, 212, 214,
];

const KANGXI_BASE: u32 = 0x2F00;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Radical {
    /// Classical radical number, 1..=214.
    pub index: u8,
    /// Codepoint in the Kangxi Radicals block.
    pub kangxi: char,
    /// Ordinary kanji with the same shape.
    pub kanji: char,
}

/// Look up a radical by its classical number.
pub fn radical(index: u8) -> Option<Radical> {
    let i = usize::from(index).checked_sub(1)?;
    KANGXI.get(i).map(|&(kangxi, kanji)| Radical {
        index,
        kangxi,
        kanji,
    })
}

/// All radicals in index order.
pub fn radicals() -> impl Iterator<Item = Radical> {
    (1..=RADICAL_COUNT as u8).filter_map(radical)
}

/// Look up a radical by either its Kangxi codepoint or its kanji form.
pub fn radical_by_char(c: char) -> Option<Radical> {
    let kangxi = kanji_to_kangxi(c).unwrap_or(c);
    let offset = (kangxi as u32).checked_sub(KANGXI_BASE)?;
    let index = u8::try_from(offset + 1).ok()?;
    radical(index).filter(|r| r.kangxi == kangxi)
}

/// Stroke count of a radical, derived from its stroke band.
pub fn stroke_count(index: u8) -> Option<u8> {
    if index == 0 || usize::from(index) > RADICAL_COUNT {
        return None;
    }
    let band = STROKE_GROUP_STARTS
        .iter()
        .rposition(|&start| start <= index)?;
    Some(band as u8 + 1)
}

/// The radicals grouped by stroke count, as `(strokes, radicals)` pairs.
pub fn stroke_groups() -> Vec<(u8, Vec<Radical>)> {
    STROKE_GROUP_STARTS
        .iter()
        .enumerate()
        .map(|(band, &start)| {
            let end = STROKE_GROUP_STARTS
                .get(band + 1)
                .copied()
                .unwrap_or(RADICAL_COUNT as u8 + 1);
            (band as u8 + 1, (start..end).filter_map(radical).collect())
        })
        .collect()
}

/// Kangxi radical codepoint for a radical's kanji form.
pub fn kanji_to_kangxi(c: char) -> Option<char> {
    static MAP: OnceLock<HashMap<char, char>> = OnceLock::new();
    MAP.get_or_init(|| KANGXI.iter().map(|&(rad, kan)| (kan, rad)).collect())
        .get(&c)
        .copied()
}

/// Kanji form of a Kangxi radical codepoint.
pub fn kangxi_to_kanji(c: char) -> Option<char> {
    let offset = (c as u32).checked_sub(KANGXI_BASE)? as usize;
    KANGXI.get(offset).map(|&(_, kan)| kan)
}

/// Canonical radical kanji form for a visual variant. Later tables win on
/// duplicate keys, so `阝` resolves to `阜`.
pub fn variant_to_kanji(c: char) -> Option<char> {
    static MAP: OnceLock<HashMap<char, char>> = OnceLock::new();
    MAP.get_or_init(|| {
        VARIANTS
            .iter()
            .chain(VARIANTS_2.iter())
            .chain(VARIANTS_3.iter())
            .copied()
            .collect()
    })
    .get(&c)
    .copied()
}

/// Add the canonical forms of every radical variant in `components`.
///
/// One pass per table, in order: variant → kanji form, kanji form → Kangxi,
/// Kangxi → kanji form. Each step sees what the previous steps added.
/// Nothing is removed, so a variant and its canonical form coexist.
pub fn close_over_variants(components: &mut BTreeSet<char>) {
    for lookup in [variant_to_kanji, kanji_to_kangxi, kangxi_to_kanji] {
        let added: Vec<char> = components.iter().filter_map(|&c| lookup(c)).collect();
        components.extend(added);
    }
}

const KANGXI: [(char, char); 214] = [
    ('⼀', '一'), ('⼁', '丨'), ('⼂', '丶'), ('⼃', '丿'), ('⼄', '乙'), ('⼅', '亅'),
    ('⼆', '二'), ('⼇', '亠'), ('⼈', '人'), ('⼉', '儿'), ('⼊', '入'), ('⼋', '八'),
    ('⼌', '冂'), ('⼍', '冖'), ('⼎', '冫'), ('⼏', '几'), ('⼐', '凵'), ('⼑', '刀'),
    ('⼒', '力'), ('⼓', '勹'), ('⼔', '匕'), ('⼕', '匚'), ('⼖', '匸'), ('⼗', '十'),
    ('⼘', '卜'), ('⼙', '卩'), ('⼚', '厂'), ('⼛', '厶'), ('⼜', '又'), ('⼝', '口'),
    ('⼞', '囗'), ('⼟', '土'), ('⼠', '士'), ('⼡', '夂'), ('⼢', '夊'), ('⼣', '夕'),
    ('⼤', '大'), ('⼥', '女'), ('⼦', '子'), ('⼧', '宀'), ('⼨', '寸'), ('⼩', '小'),
    ('⼪', '尢'), ('⼫', '尸'), ('⼬', '屮'), ('⼭', '山'), ('⼮', '巛'), ('⼯', '工'),
    ('⼰', '己'), ('⼱', '巾'), ('⼲', '干'), ('⼳', '幺'), ('⼴', '广'), ('⼵', '廴'),
    ('⼶', '廾'), ('⼷', '弋'), ('⼸', '弓'), ('⼹', '彐'), ('⼺', '彡'), ('⼻', '彳'),
    ('⼼', '心'), ('⼽', '戈'), ('⼾', '戶'), ('⼿', '手'), ('⽀', '支'), ('⽁', '攴'),
    ('⽂', '文'), ('⽃', '斗'), ('⽄', '斤'), ('⽅', '方'), ('⽆', '无'), ('⽇', '日'),
    ('⽈', '曰'), ('⽉', '月'), ('⽊', '木'), ('⽋', '欠'), ('⽌', '止'), ('⽍', '歹'),
    ('⽎', '殳'), ('⽏', '毋'), ('⽐', '比'), ('⽑', '毛'), ('⽒', '氏'), ('⽓', '气'),
    ('⽔', '水'), ('⽕', '火'), ('⽖', '爪'), ('⽗', '父'), ('⽘', '爻'), ('⽙', '爿'),
    ('⽚', '片'), ('⽛', '牙'), ('⽜', '牛'), ('⽝', '犬'), ('⽞', '玄'), ('⽟', '玉'),
    ('⽠', '瓜'), ('⽡', '瓦'), ('⽢', '甘'), ('⽣', '生'), ('⽤', '用'), ('⽥', '田'),
    ('⽦', '疋'), ('⽧', '疒'), ('⽨', '癶'), ('⽩', '白'), ('⽪', '皮'), ('⽫', '皿'),
    ('⽬', '目'), ('⽭', '矛'), ('⽮', '矢'), ('⽯', '石'), ('⽰', '示'), ('⽱', '禸'),
    ('⽲', '禾'), ('⽳', '穴'), ('⽴', '立'), ('⽵', '竹'), ('⽶', '米'), ('⽷', '糸'),
    ('⽸', '缶'), ('⽹', '网'), ('⽺', '羊'), ('⽻', '羽'), ('⽼', '老'), ('⽽', '而'),
    ('⽾', '耒'), ('⽿', '耳'), ('⾀', '聿'), ('⾁', '肉'), ('⾂', '臣'), ('⾃', '自'),
    ('⾄', '至'), ('⾅', '臼'), ('⾆', '舌'), ('⾇', '舛'), ('⾈', '舟'), ('⾉', '艮'),
    ('⾊', '色'), ('⾋', '艸'), ('⾌', '虍'), ('⾍', '虫'), ('⾎', '血'), ('⾏', '行'),
    ('⾐', '衣'), ('⾑', '襾'), ('⾒', '見'), ('⾓', '角'), ('⾔', '言'), ('⾕', '谷'),
    ('⾖', '豆'), ('⾗', '豕'), ('⾘', '豸'), ('⾙', '貝'), ('⾚', '赤'), ('⾛', '走'),
    ('⾜', '足'), ('⾝', '身'), ('⾞', '車'), ('⾟', '辛'), ('⾠', '辰'), ('⾡', '辵'),
    ('⾢', '邑'), ('⾣', '酉'), ('⾤', '釆'), ('⾥', '里'), ('⾦', '金'), ('⾧', '長'),
    ('⾨', '門'), ('⾩', '阜'), ('⾪', '隶'), ('⾫', '隹'), ('⾬', '雨'), ('⾭', '靑'),
    ('⾮', '非'), ('⾯', '面'), ('⾰', '革'), ('⾱', '韋'), ('⾲', '韭'), ('⾳', '音'),
    ('⾴', '頁'), ('⾵', '風'), ('⾶', '飛'), ('⾷', '食'), ('⾸', '首'), ('⾹', '香'),
    ('⾺', '馬'), ('⾻', '骨'), ('⾼', '高'), ('⾽', '髟'), ('⾾', '鬥'), ('⾿', '鬯'),
    ('⿀', '鬲'), ('⿁', '鬼'), ('⿂', '魚'), ('⿃', '鳥'), ('⿄', '鹵'), ('⿅', '鹿'),
    ('⿆', '麥'), ('⿇', '麻'), ('⿈', '黃'), ('⿉', '黍'), ('⿊', '黑'), ('⿋', '黹'),
    ('⿌', '黽'), ('⿍', '鼎'), ('⿎', '鼓'), ('⿏', '鼠'), ('⿐', '鼻'), ('⿑', '齊'),
    ('⿒', '齒'), ('⿓', '龍'), ('⿔', '龜'), ('⿕', '龠'),
];

const VARIANTS: [(char, char); 47] = [
    ('𠆢', '人'), ('𦉰', '网'), ('⺃', '乙'), ('⺅', '人'), ('⺇', '几'), ('⺉', '刀'),
    ('⺌', '小'), ('⺍', '小'), ('⺔', '彐'), ('⺕', '彐'), ('⺖', '心'), ('⺗', '心'),
    ('⺘', '手'), ('⺙', '攴'), ('⺛', '无'), ('⺝', '月'), ('⺡', '水'), ('⺣', '火'),
    ('⺤', '爪'), ('⺨', '犬'), ('⺪', '疋'), ('⺫', '网'), ('⺭', '示'), ('⺮', '竹'),
    ('⺷', '羊'), ('⺹', '老'), ('⺾', '艸'), ('⻂', '衣'), ('⻃', '襾'), ('⻊', '足'),
    ('⻌', '辵'), ('⻏', '邑'), ('⻖', '阜'), ('⻗', '雨'), ('⻘', '靑'), ('⻟', '食'),
    ('⻨', '麥'), ('⻩', '黃'), ('⻫', '齊'), ('⻭', '齒'), ('⻲', '龜'), ('㓁', '网'),
    ('川', '巛'), ('氺', '水'), ('爫', '爪'), ('黒', '黑'), ('\u{FA1E}', '羽'),
];

const VARIANTS_2: [(char, char); 72] = [
    ('⺊', '卜'), ('⺮', '竹'), ('⺳', '网'), ('⺼', '肉'), ('⻊', '足'), ('⻗', '雨'),
    ('\u{3007}', '囗'), ('丬', '爿'), ('乀', '丿'), ('乁', '丿'), ('乚', '乙'), ('乛', '乙'),
    ('亻', '人'), ('刁', '刀'), ('刂', '刀'), ('夨', '大'), ('孑', '子'), ('孒', '子'),
    ('尣', '尢'), ('巜', '巛'), ('川', '巛'), ('已', '己'), ('巳', '己'), ('彑', '彐'),
    ('忄', '心'), ('戸', '戶'), ('扌', '手'), ('才', '手'), ('攵', '攴'), ('斉', '齊'),
    ('旡', '无'), ('朩', '木'), ('歺', '歹'), ('毌', '毋'), ('氵', '水'), ('灬', '火'),
    ('爫', '爪'), ('牜', '牛'), ('犭', '犬'), ('玊', '玉'), ('王', '玉'), ('甩', '用'),
    ('由', '田'), ('甲', '田'), ('申', '田'), ('甴', '田'), ('礻', '示'), ('罒', '网'),
    ('罓', '网'), ('耂', '老'), ('考', '老'), ('艹', '艸'), ('草', '艸'), ('衤', '衣'),
    ('西', '襾'), ('覀', '襾'), ('訁', '言'), ('赱', '走'), ('辶', '辵'), ('釒', '金'),
    ('镸', '長'), ('阝', '邑'), ('阝', '阜'), ('青', '靑'), ('靣', '面'), ('飠', '食'),
    ('髙', '高'), ('麦', '麥'), ('黄', '黃'), ('黒', '黑'), ('鼔', '鼓'), ('鼡', '鼠'),
];

const VARIANTS_3: [(char, char); 2] = [
    ('𩙿', '食'), ('歯', '齒'),
];

/// Radical shapes flagged upstream as having unlisted private variants.
/// Not consulted by [`close_over_variants`]; what they should map to is
/// still undecided.
pub const PRIVATE_VARIANTS: &str = "穴麻舟歹言巾白八日火矛骨方石至糸貝金片牙木子米口車豆目身耳虫釆丿女玉士里走寸田工谷立戶酉土角馬魚牛矢山山弓韋牙舛肉目";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unicode::{is_kanji, is_radical};

    use proptest::prelude::*;

    #[test]
    fn table_is_complete_and_in_kangxi_order() {
        assert_eq!(radicals().count(), RADICAL_COUNT);
        for (i, r) in radicals().enumerate() {
            assert_eq!(r.index as usize, i + 1);
            assert_eq!(r.kangxi as u32 - KANGXI_BASE, i as u32);
            assert!(is_kanji(r.kanji), "{} is not a kanji", r.kanji);
        }
        assert_eq!(radical(0), None);
        assert_eq!(radical(215), None);
    }

    #[test]
    fn lookups_are_inverse() {
        for r in radicals() {
            assert_eq!(kanji_to_kangxi(r.kanji), Some(r.kangxi));
            assert_eq!(kangxi_to_kanji(r.kangxi), Some(r.kanji));
            assert_eq!(radical_by_char(r.kanji), Some(r));
            assert_eq!(radical_by_char(r.kangxi), Some(r));
        }
        assert_eq!(kangxi_to_kanji('\u{2FD6}'), None);
        assert_eq!(radical_by_char('猫'), None);
    }

    #[test]
    fn radical_94_is_dog() {
        let r = radical(94).unwrap();
        assert_eq!(r.kangxi, '⽝');
        assert_eq!(r.kanji, '犬');
        assert_eq!(stroke_count(94), Some(4));
        assert_eq!(radical(72).map(|r| (r.kangxi, r.kanji)), Some(('⽇', '日')));
    }

    #[test]
    fn stroke_bands() {
        assert_eq!(stroke_count(1), Some(1));
        assert_eq!(stroke_count(6), Some(1));
        assert_eq!(stroke_count(7), Some(2));
        assert_eq!(stroke_count(213), Some(16));
        assert_eq!(stroke_count(214), Some(17));
        assert_eq!(stroke_count(0), None);
        assert_eq!(stroke_count(215), None);

        let groups = stroke_groups();
        assert_eq!(groups.len(), 17);
        assert_eq!(groups.iter().map(|(_, g)| g.len()).sum::<usize>(), RADICAL_COUNT);
        assert_eq!(groups[0].1.len(), 6);
        assert_eq!(groups[16], (17, vec![radical(214).unwrap()]));
    }

    #[test]
    fn variants_map_onto_radical_kanji() {
        for &(variant, kanji) in VARIANTS.iter().chain(&VARIANTS_2).chain(&VARIANTS_3) {
            assert!(kanji_to_kangxi(kanji).is_some(), "{variant} → {kanji}");
        }
        assert_eq!(variant_to_kanji('阝'), Some('阜'));
        assert_eq!(variant_to_kanji('犭'), Some('犬'));
        assert_eq!(variant_to_kanji('\u{FA1E}'), Some('羽'));
        assert_eq!(variant_to_kanji('犬'), None);
    }

    #[test]
    fn closure_adds_canonical_forms_without_removing() {
        let mut set: BTreeSet<char> = ['犭', '田'].into_iter().collect();
        close_over_variants(&mut set);
        let expected: BTreeSet<char> = ['犭', '犬', '⽝', '田', '⽥'].into_iter().collect();
        assert_eq!(set, expected);

        let mut set: BTreeSet<char> = ['⺨'].into_iter().collect();
        close_over_variants(&mut set);
        assert!(set.contains(&'⺨') && set.contains(&'犬') && set.contains(&'⽝'));
    }

    #[test]
    fn private_variants_are_not_wired_in() {
        for c in PRIVATE_VARIANTS.chars() {
            assert_eq!(variant_to_kanji(c), None, "{c}");
        }
    }

    fn arb_component() -> impl Strategy<Value = char> {
        let mut pool: Vec<char> = VARIANTS
            .iter()
            .chain(&VARIANTS_2)
            .chain(&VARIANTS_3)
            .flat_map(|&(a, b)| [a, b])
            .collect();
        pool.extend(KANGXI.iter().flat_map(|&(a, b)| [a, b]));
        pool.extend(['猫', '苗', '艾', 'ノ', 'ネ']);
        prop::sample::select(pool)
    }

    proptest! {
        #[test]
        fn closure_is_idempotent(chars in prop::collection::btree_set(arb_component(), 0..12)) {
            let mut once = chars.clone();
            close_over_variants(&mut once);
            let mut twice = once.clone();
            close_over_variants(&mut twice);
            prop_assert_eq!(&once, &twice);
            prop_assert!(chars.is_subset(&once));
        }

        #[test]
        fn closure_only_adds_radical_forms(chars in prop::collection::btree_set(arb_component(), 0..12)) {
            let mut closed = chars.clone();
            close_over_variants(&mut closed);
            for c in closed.difference(&chars) {
                prop_assert!(is_radical(*c) || kanji_to_kangxi(*c).is_some());
            }
        }
    }
}
