//! English / romaji aliases for the Japanese names the catalog stores.

use std::collections::HashSet;

/// Lowercase alias -> catalog character name.
const CHARACTERS: &[(&str, &str)] = &[
    ("honoka", "高坂穂乃果"),
    ("kousaka honoka", "高坂穂乃果"),
    ("eli", "絢瀬絵里"),
    ("ayase eli", "絢瀬絵里"),
    ("kotori", "南ことり"),
    ("minami kotori", "南ことり"),
    ("umi", "園田海未"),
    ("sonoda umi", "園田海未"),
    ("rin", "星空凛"),
    ("hoshizora rin", "星空凛"),
    ("maki", "西木野真姫"),
    ("nishikino maki", "西木野真姫"),
    ("nozomi", "東條希"),
    ("tojo nozomi", "東條希"),
    ("hanayo", "小泉花陽"),
    ("koizumi hanayo", "小泉花陽"),
    ("nico", "矢澤にこ"),
    ("yazawa nico", "矢澤にこ"),
    ("chika", "高海千歌"),
    ("takami chika", "高海千歌"),
    ("riko", "桜内梨子"),
    ("sakurauchi riko", "桜内梨子"),
    ("kanan", "松浦果南"),
    ("matsuura kanan", "松浦果南"),
    ("dia", "黒澤ダイヤ"),
    ("kurosawa dia", "黒澤ダイヤ"),
    ("you", "渡辺曜"),
    ("watanabe you", "渡辺曜"),
    ("yoshiko", "津島善子"),
    ("tsushima yoshiko", "津島善子"),
    ("yohane", "津島善子"),
    ("hanamaru", "国木田花丸"),
    ("kunikida hanamaru", "国木田花丸"),
    ("mari", "小原鞠莉"),
    ("ohara mari", "小原鞠莉"),
    ("ruby", "黒澤ルビィ"),
    ("kurosawa ruby", "黒澤ルビィ"),
    ("ayumu", "上原歩夢"),
    ("uehara ayumu", "上原歩夢"),
    ("kasumi", "中須かすみ"),
    ("nakasu kasumi", "中須かすみ"),
    ("shizuku", "桜坂しずく"),
    ("osaka shizuku", "桜坂しずく"),
    ("karin", "朝香果林"),
    ("asaka karin", "朝香果林"),
    ("ai", "宮下愛"),
    ("miyashita ai", "宮下愛"),
    ("kanata", "近江彼方"),
    ("konoe kanata", "近江彼方"),
    ("setsuna", "優木せつ菜"),
    ("yuki setsuna", "優木せつ菜"),
    ("emma", "エマ・ヴェルデ"),
    ("emma verde", "エマ・ヴェルデ"),
    ("rina", "天王寺璃奈"),
    ("tennoji rina", "天王寺璃奈"),
    ("shioriko", "三船栞子"),
    ("mifune shioriko", "三船栞子"),
    ("mia", "ミア・テイラー"),
    ("mia taylor", "ミア・テイラー"),
    ("lanzhu", "鐘嵐珠"),
    ("zhong lanzhu", "鐘嵐珠"),
    ("kanon", "澁谷かのん"),
    ("shibuya kanon", "澁谷かのん"),
    ("keke", "唐可可"),
    ("tang keke", "唐可可"),
    ("chisato", "嵐千砂都"),
    ("arashi chisato", "嵐千砂都"),
    ("sumire", "平安名すみれ"),
    ("heanna sumire", "平安名すみれ"),
    ("ren", "葉月恋"),
    ("hazuki ren", "葉月恋"),
    ("kinako", "桜小路きな子"),
    ("sakurakoji kinako", "桜小路きな子"),
    ("mei", "米女メイ"),
    ("yoneme mei", "米女メイ"),
    ("shiki", "若菜四季"),
    ("wakana shiki", "若菜四季"),
    ("natsumi", "鬼塚夏美"),
    ("onitsuka natsumi", "鬼塚夏美"),
    ("margarete", "ウィーン・マルガレーテ"),
    ("wien margarete", "ウィーン・マルガレーテ"),
    ("tomari", "鬼塚冬毬"),
    ("onitsuka tomari", "鬼塚冬毬"),
    ("kaho", "日野下花帆"),
    ("hinoshita kaho", "日野下花帆"),
    ("sayaka", "村野さやか"),
    ("murano sayaka", "村野さやか"),
    ("kozue", "乙宗梢"),
    ("otomune kozue", "乙宗梢"),
    ("tsuzuri", "夕霧綴理"),
    ("yugiri tsuzuri", "夕霧綴理"),
    ("rurino", "大沢瑠璃乃"),
    ("osawa rurino", "大沢瑠璃乃"),
    ("ruri", "大沢瑠璃乃"),
    ("megumi", "藤島慈"),
    ("fujishima megumi", "藤島慈"),
    ("ginko", "百生吟子"),
    ("momose ginko", "百生吟子"),
    ("kosuzu", "徒町小鈴"),
    ("kachimachi kosuzu", "徒町小鈴"),
    ("hime", "安養寺姫芽"),
    ("anyoji hime", "安養寺姫芽"),
    ("ceras", "セラス柳田リリエンフェルト"),
    ("ceras yanagida lilienfeld", "セラス柳田リリエンフェルト"),
    ("izumi", "桂城泉"),
    ("katsuragi izumi", "桂城泉"),
];

/// Lowercase alias -> catalog unit name.
const UNITS: &[(&str, &str)] = &[
    ("printemps", "Printemps"),
    ("lily white", "lily white"),
    ("bibi", "BiBi"),
    ("cyaron", "CYaRon!"),
    ("cyaron!", "CYaRon!"),
    ("azalea", "AZALEA"),
    ("guilty kiss", "Guilty Kiss"),
    ("diverdiva", "DiverDiva"),
    ("azuna", "A・ZU・NA"),
    ("a・zu・na", "A・ZU・NA"),
    ("a.zu.na", "A・ZU・NA"),
    ("qu4rtz", "QU4RTZ"),
    ("quartz", "QU4RTZ"),
    ("r3birth", "R3BIRTH"),
    ("rebirth", "R3BIRTH"),
    ("catchu", "CatChu!"),
    ("catchu!", "CatChu!"),
    ("kaleidoscore", "KALEIDOSCORE"),
    ("5yncri5e", "5yncri5e!"),
    ("5yncri5e!", "5yncri5e!"),
    ("syncrise", "5yncri5e!"),
    ("cerise bouquet", "Cerise Bouquet"),
    ("dollchestra", "DOLLCHESTRA"),
    ("mira-cra park", "Mira-Cra Park!"),
    ("mira-cra park!", "Mira-Cra Park!"),
    ("miracra", "Mira-Cra Park!"),
    ("edel note", "Edel Note"),
];

/// Lowercase alias -> catalog group name.
const GROUP_ALIASES: &[(&str, &str)] = &[
    ("muse", "ラブライブ！"),
    ("mus", "ラブライブ！"),
    ("mu's", "ラブライブ！"),
    ("aqours", "ラブライブ！サンシャイン!!"),
    ("nijigasaki", "ラブライブ！虹ヶ咲学園スクールアイドル同好会"),
    ("liella", "ラブライブ！スーパースター!!"),
    ("hasunosora", "蓮ノ空女学院スクールアイドルクラブ"),
];

/// Display name -> catalog group name, as offered by autocomplete.
pub const GROUPS: &[(&str, &str)] = &[
    ("μ's", "ラブライブ！"),
    ("Aqours", "ラブライブ！サンシャイン!!"),
    ("Nijigasaki", "ラブライブ！虹ヶ咲学園スクールアイドル同好会"),
    ("Liella!", "ラブライブ！スーパースター!!"),
    ("Hasunosora", "蓮ノ空女学院スクールアイドルクラブ"),
];

fn lookup(table: &[(&str, &'static str)], input: &str) -> Option<&'static str> {
    let key = input.trim().to_lowercase();
    table.iter().find(|(alias, _)| *alias == key).map(|(_, name)| *name)
}

/// Catalog name for a typed character alias, e.g. `"Honoka"` -> `"高坂穂乃果"`.
pub fn character_name(input: &str) -> Option<&'static str> {
    lookup(CHARACTERS, input)
}

pub fn unit_name(input: &str) -> Option<&'static str> {
    lookup(UNITS, input)
}

pub fn group_name(input: &str) -> Option<&'static str> {
    lookup(GROUP_ALIASES, input)
}

/// Character autocomplete: `("Honoka (高坂穂乃果)", "高坂穂乃果")` pairs whose
/// English label contains `partial`, sorted by label.
///
/// Each character is labelled by its first alias only.
pub fn character_choices(partial: &str, limit: usize) -> Vec<(String, &'static str)> {
    let partial = partial.to_lowercase();
    let mut seen = HashSet::new();
    let mut choices: Vec<(String, &'static str)> = CHARACTERS
        .iter()
        .filter(|(_, jp)| seen.insert(*jp))
        .map(|(alias, jp)| (title_case(alias), *jp))
        .filter(|(label, _)| label.to_lowercase().contains(&partial))
        .map(|(label, jp)| (format!("{} ({})", label, jp), jp))
        .collect();
    choices.sort_by(|a, b| a.0.cmp(&b.0));
    choices.truncate(limit);
    choices
}

/// Unit autocomplete: distinct catalog unit names with an alias containing `partial`.
pub fn unit_choices(partial: &str, limit: usize) -> Vec<&'static str> {
    let partial = partial.to_lowercase();
    let mut seen = HashSet::new();
    UNITS
        .iter()
        .filter(|(alias, _)| alias.contains(&partial))
        .map(|(_, name)| *name)
        .filter(|name| seen.insert(*name))
        .take(limit)
        .collect()
}

pub fn group_choices(partial: &str) -> Vec<(&'static str, &'static str)> {
    let partial = partial.to_lowercase();
    GROUPS
        .iter()
        .filter(|(label, _)| label.to_lowercase().contains(&partial))
        .copied()
        .collect()
}

fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
