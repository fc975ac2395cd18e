//! Item catalogs: the static ground truth every quiz is scored against.
//!
//! Built-in catalogs are process-wide, read-only, and built once on first
//! use. Sessions hold them behind an `Arc` so a custom catalog (for example a
//! subset of the Ishihara plates) can be used the same way.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::model::{ItemId, QuizKind};
use crate::traits::QuizItem;

// ---------------------------------------------------------------------------
// Catalog container
// ---------------------------------------------------------------------------

/// An ordered, identifier-indexed set of items for one quiz.
///
/// Catalog order is the canonical order: plates are presented in it, and
/// arrangement quizzes are scored against it.
#[derive(Debug, Clone)]
pub struct Catalog<T> {
    quiz: QuizKind,
    name: String,
    items: Vec<T>,
    index: HashMap<ItemId, usize>,
}

impl<T: QuizItem> Catalog<T> {
    /// Build a catalog, rejecting duplicate identifiers.
    pub fn new(quiz: QuizKind, name: impl Into<String>, items: Vec<T>) -> Result<Self, QuizError> {
        let mut index = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            if index.insert(item.id().clone(), position).is_some() {
                return Err(QuizError::DuplicateItem {
                    quiz,
                    item: item.id().clone(),
                });
            }
        }
        Ok(Self {
            quiz,
            name: name.into(),
            items,
            index,
        })
    }

    pub fn quiz(&self) -> QuizKind {
        self.quiz
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in canonical order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn ids(&self) -> impl Iterator<Item = &ItemId> + '_ {
        self.items.iter().map(QuizItem::id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.index.contains_key(id)
    }

    /// Look up an item, failing loudly for identifiers the catalog does not
    /// know.
    pub fn get(&self, id: &ItemId) -> Result<&T, QuizError> {
        self.index
            .get(id)
            .map(|&position| &self.items[position])
            .ok_or_else(|| QuizError::unknown(self.quiz, id))
    }

    /// Canonical position (0-based) of an item.
    pub fn rank(&self, id: &ItemId) -> Result<usize, QuizError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| QuizError::unknown(self.quiz, id))
    }

    /// A new catalog holding only `ids`, kept in this catalog's canonical
    /// order.
    pub fn subset<'a>(&self, ids: impl IntoIterator<Item = &'a ItemId>) -> Result<Self, QuizError> {
        let mut positions = ids
            .into_iter()
            .map(|id| self.rank(id))
            .collect::<Result<Vec<_>, _>>()?;
        positions.sort_unstable();
        positions.dedup();
        let items = positions.into_iter().map(|p| self.items[p].clone()).collect();
        Self::new(self.quiz, self.name.clone(), items)
    }
}

/// Builds a built-in catalog whose identifiers are unique by construction.
fn builtin<T: QuizItem>(quiz: QuizKind, name: &str, items: Vec<T>) -> Arc<Catalog<T>> {
    let mut index = HashMap::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        index.insert(item.id().clone(), position);
    }
    debug_assert_eq!(index.len(), items.len(), "duplicate id in {name}");
    Arc::new(Catalog {
        quiz,
        name: name.to_string(),
        items,
        index,
    })
}

// ---------------------------------------------------------------------------
// Ishihara plates
// ---------------------------------------------------------------------------

/// The three readings an Ishihara plate is designed to separate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisionCategory {
    Normal,
    Deutan,
    Protan,
}

impl VisionCategory {
    pub const ALL: [VisionCategory; 3] = [
        VisionCategory::Normal,
        VisionCategory::Deutan,
        VisionCategory::Protan,
    ];
}

impl fmt::Display for VisionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisionCategory::Normal => write!(f, "normal"),
            VisionCategory::Deutan => write!(f, "deutan"),
            VisionCategory::Protan => write!(f, "protan"),
        }
    }
}

/// One pseudo-isochromatic plate. An empty expected reading means nothing
/// should be seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IshiharaPlate {
    pub id: ItemId,
    pub number: u32,
    pub normal: String,
    pub deutan: String,
    pub protan: String,
    pub description: String,
}

impl IshiharaPlate {
    pub fn plate_id(number: u32) -> ItemId {
        ItemId::new(format!("plate-{number}"))
    }

    /// Expected reading for one category.
    pub fn expected(&self, category: VisionCategory) -> &str {
        match category {
            VisionCategory::Normal => &self.normal,
            VisionCategory::Deutan => &self.deutan,
            VisionCategory::Protan => &self.protan,
        }
    }
}

impl QuizItem for IshiharaPlate {
    fn id(&self) -> &ItemId {
        &self.id
    }
}

const ISHIHARA_PLATES: [(u32, &str, &str, &str); 24] = [
    (1, "12", "12", "12"),
    (2, "8", "3", "3"),
    (3, "6", "5", "5"),
    (4, "29", "70", "70"),
    (5, "57", "35", "35"),
    (6, "5", "2", "2"),
    (7, "3", "5", "5"),
    (8, "15", "17", "17"),
    (9, "74", "21", "21"),
    (10, "2", "", ""),
    (11, "6", "", ""),
    (12, "97", "", ""),
    (13, "45", "", ""),
    (14, "5", "", ""),
    (15, "7", "", ""),
    (16, "16", "", ""),
    (17, "73", "", ""),
    (18, "", "5", "5"),
    (19, "", "2", "2"),
    (20, "", "45", "45"),
    (21, "", "73", "73"),
    (22, "26", "2", "6"),
    (23, "42", "4", "2"),
    (24, "35", "3", "5"),
];

fn describe_plate(normal: &str, deutan: &str, protan: &str) -> String {
    let reading = |r: &str| {
        if r.is_empty() {
            "Nothing".to_string()
        } else {
            r.to_string()
        }
    };
    if normal == deutan && deutan == protan {
        format!("Everyone should see {}", reading(normal))
    } else if deutan == protan {
        format!("Normal: {}, Deficiency: {}", reading(normal), reading(deutan))
    } else {
        format!(
            "Normal: {}, Protan: {}, Deutan: {}",
            reading(normal),
            reading(protan),
            reading(deutan)
        )
    }
}

static ISHIHARA: LazyLock<Arc<Catalog<IshiharaPlate>>> = LazyLock::new(|| {
    let plates = ISHIHARA_PLATES
        .iter()
        .map(|&(number, normal, deutan, protan)| IshiharaPlate {
            id: IshiharaPlate::plate_id(number),
            number,
            normal: normal.to_string(),
            deutan: deutan.to_string(),
            protan: protan.to_string(),
            description: describe_plate(normal, deutan, protan),
        })
        .collect();
    builtin(QuizKind::Ishihara, "Ishihara 24-plate edition", plates)
});

/// The 24-plate Ishihara edition.
pub fn ishihara() -> Arc<Catalog<IshiharaPlate>> {
    Arc::clone(&ISHIHARA)
}

// ---------------------------------------------------------------------------
// Lantern pairs
// ---------------------------------------------------------------------------

/// Signal light colours used by the lantern test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightColor {
    Red,
    Green,
    Yellow,
    White,
}

impl LightColor {
    pub const ALL: [LightColor; 4] = [
        LightColor::Red,
        LightColor::Green,
        LightColor::Yellow,
        LightColor::White,
    ];

    /// Display colour of the simulated light.
    pub fn hex(&self) -> &'static str {
        match self {
            LightColor::Red => "#FF0000",
            LightColor::Green => "#00FF00",
            LightColor::Yellow => "#FFD200",
            LightColor::White => "#FFFFFF",
        }
    }
}

impl fmt::Display for LightColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LightColor::Red => write!(f, "red"),
            LightColor::Green => write!(f, "green"),
            LightColor::Yellow => write!(f, "yellow"),
            LightColor::White => write!(f, "white"),
        }
    }
}

impl FromStr for LightColor {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "red" | "r" => Ok(LightColor::Red),
            "green" | "g" => Ok(LightColor::Green),
            "yellow" | "y" => Ok(LightColor::Yellow),
            "white" | "w" => Ok(LightColor::White),
            _ => Err(QuizError::invalid_input(
                s,
                "expected one of red, green, yellow, white",
            )),
        }
    }
}

/// Two navigation lights shown side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanternPair {
    pub id: ItemId,
    pub first: LightColor,
    pub second: LightColor,
}

impl QuizItem for LanternPair {
    fn id(&self) -> &ItemId {
        &self.id
    }
}

const LANTERN_PAIRS: [(LightColor, LightColor); 9] = [
    (LightColor::Red, LightColor::Green),
    (LightColor::Red, LightColor::White),
    (LightColor::Green, LightColor::White),
    (LightColor::Yellow, LightColor::Yellow),
    (LightColor::Red, LightColor::Red),
    (LightColor::Green, LightColor::Green),
    (LightColor::White, LightColor::White),
    (LightColor::Red, LightColor::Yellow),
    (LightColor::Green, LightColor::Yellow),
];

static LANTERN: LazyLock<Arc<Catalog<LanternPair>>> = LazyLock::new(|| {
    let pairs = LANTERN_PAIRS
        .iter()
        .enumerate()
        .map(|(i, &(first, second))| LanternPair {
            id: ItemId::new(format!("pair-{}", i + 1)),
            first,
            second,
        })
        .collect();
    builtin(QuizKind::Lantern, "IMO lantern pairs", pairs)
});

/// The nine lantern light pairs.
pub fn lantern() -> Arc<Catalog<LanternPair>> {
    Arc::clone(&LANTERN)
}

// ---------------------------------------------------------------------------
// ECDIS chart elements
// ---------------------------------------------------------------------------

/// ECDIS display palettes (IHO S-52).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Day,
    Dusk,
    Night,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 3] = [DisplayMode::Day, DisplayMode::Dusk, DisplayMode::Night];

    /// Element colours shown in this mode.
    pub fn palette(&self) -> &'static [(ChartElement, &'static str); 7] {
        match self {
            DisplayMode::Day => &DAY_PALETTE,
            DisplayMode::Dusk => &DUSK_PALETTE,
            DisplayMode::Night => &NIGHT_PALETTE,
        }
    }

    /// Hex colour of `element` in this mode.
    pub fn color_of(&self, element: ChartElement) -> &'static str {
        self.palette()
            .iter()
            .find(|(e, _)| *e == element)
            .map(|(_, hex)| *hex)
            .unwrap_or("#000000")
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::Day => write!(f, "day"),
            DisplayMode::Dusk => write!(f, "dusk"),
            DisplayMode::Night => write!(f, "night"),
        }
    }
}

impl FromStr for DisplayMode {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(DisplayMode::Day),
            "dusk" => Ok(DisplayMode::Dusk),
            "night" => Ok(DisplayMode::Night),
            _ => Err(QuizError::invalid_input(s, "expected day, dusk or night")),
        }
    }
}

/// Chart elements an ECDIS palette assigns colours to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartElement {
    Sea,
    Land,
    DepthContours,
    Text,
    Danger,
    Safe,
    NavigationAids,
}

impl ChartElement {
    /// Elements offered as answers. Text is never a target.
    pub const SELECTABLE: [ChartElement; 6] = [
        ChartElement::Sea,
        ChartElement::Land,
        ChartElement::DepthContours,
        ChartElement::Danger,
        ChartElement::Safe,
        ChartElement::NavigationAids,
    ];

    /// Title-case label, e.g. `Navigation Aids`.
    pub fn label(&self) -> &'static str {
        match self {
            ChartElement::Sea => "Sea",
            ChartElement::Land => "Land",
            ChartElement::DepthContours => "Depth Contours",
            ChartElement::Text => "Text",
            ChartElement::Danger => "Danger",
            ChartElement::Safe => "Safe",
            ChartElement::NavigationAids => "Navigation Aids",
        }
    }
}

impl fmt::Display for ChartElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartElement::Sea => write!(f, "sea"),
            ChartElement::Land => write!(f, "land"),
            ChartElement::DepthContours => write!(f, "depth_contours"),
            ChartElement::Text => write!(f, "text"),
            ChartElement::Danger => write!(f, "danger"),
            ChartElement::Safe => write!(f, "safe"),
            ChartElement::NavigationAids => write!(f, "navigation_aids"),
        }
    }
}

impl FromStr for ChartElement {
    type Err = QuizError;

    /// Accepts the snake-case key or the on-screen label in any case
    /// (`Navigation Aids`, `navigation-aids`, `navigation_aids`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace([' ', '-'], "_");
        match key.as_str() {
            "sea" => Ok(ChartElement::Sea),
            "land" => Ok(ChartElement::Land),
            "depth_contours" => Ok(ChartElement::DepthContours),
            "text" => Ok(ChartElement::Text),
            "danger" => Ok(ChartElement::Danger),
            "safe" => Ok(ChartElement::Safe),
            "navigation_aids" => Ok(ChartElement::NavigationAids),
            _ => Err(QuizError::invalid_input(s, "not a chart element")),
        }
    }
}

const DAY_PALETTE: [(ChartElement, &str); 7] = [
    (ChartElement::Sea, "#AEE9FF"),
    (ChartElement::Land, "#E5D8A6"),
    (ChartElement::DepthContours, "#0076BF"),
    (ChartElement::Text, "#000000"),
    (ChartElement::Danger, "#FF4444"),
    (ChartElement::Safe, "#44FF44"),
    (ChartElement::NavigationAids, "#FFAA00"),
];

const DUSK_PALETTE: [(ChartElement, &str); 7] = [
    (ChartElement::Sea, "#3E6079"),
    (ChartElement::Land, "#927A48"),
    (ChartElement::DepthContours, "#4E9ED9"),
    (ChartElement::Text, "#FFFFFF"),
    (ChartElement::Danger, "#FF6666"),
    (ChartElement::Safe, "#66FF66"),
    (ChartElement::NavigationAids, "#FFBB44"),
];

const NIGHT_PALETTE: [(ChartElement, &str); 7] = [
    (ChartElement::Sea, "#000A1A"),
    (ChartElement::Land, "#4A2E00"),
    (ChartElement::DepthContours, "#1E3C66"),
    (ChartElement::Text, "#FFFFA8"),
    (ChartElement::Danger, "#FF8888"),
    (ChartElement::Safe, "#88FF88"),
    (ChartElement::NavigationAids, "#FFCC66"),
];

/// "Identify the X on the chart" question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartQuestion {
    pub id: ItemId,
    pub prompt: String,
    pub target: ChartElement,
    pub hint: String,
}

impl QuizItem for ChartQuestion {
    fn id(&self) -> &ItemId {
        &self.id
    }
}

const CHART_QUESTIONS: [(&str, ChartElement, &str); 6] = [
    (
        "Identify the DANGER zone on the chart",
        ChartElement::Danger,
        "Danger areas are marked in red tones",
    ),
    (
        "Identify the SAFE navigation channel",
        ChartElement::Safe,
        "Safe channels are marked in green tones",
    ),
    (
        "Find the LAND area on the chart",
        ChartElement::Land,
        "Land is typically shown in beige/brown tones",
    ),
    (
        "Locate the DEPTH CONTOURS",
        ChartElement::DepthContours,
        "Depth contours show water depth in blue tones",
    ),
    (
        "Identify NAVIGATION AIDS (buoys, markers)",
        ChartElement::NavigationAids,
        "Navigation aids are shown in yellow/orange tones",
    ),
    (
        "Find the SEA area on the chart",
        ChartElement::Sea,
        "Sea areas are shown in blue tones",
    ),
];

static CHART: LazyLock<Arc<Catalog<ChartQuestion>>> = LazyLock::new(|| {
    let questions = CHART_QUESTIONS
        .iter()
        .enumerate()
        .map(|(i, &(prompt, target, hint))| ChartQuestion {
            id: ItemId::new(format!("chart-{}", i + 1)),
            prompt: prompt.to_string(),
            target,
            hint: hint.to_string(),
        })
        .collect();
    builtin(QuizKind::Chart, "ECDIS chart elements", questions)
});

/// The six ECDIS chart-element questions.
pub fn chart() -> Arc<Catalog<ChartQuestion>> {
    Arc::clone(&CHART)
}

// ---------------------------------------------------------------------------
// Hue swatches
// ---------------------------------------------------------------------------

/// A colour chip in an arrangement task. Catalog order is the correct order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swatch {
    pub id: ItemId,
    pub hex: String,
    pub label: Option<String>,
}

impl QuizItem for Swatch {
    fn id(&self) -> &ItemId {
        &self.id
    }
}

fn swatches(prefix: &str, colors: &[(&str, Option<&str>)]) -> Vec<Swatch> {
    colors
        .iter()
        .enumerate()
        .map(|(i, &(hex, label))| Swatch {
            id: ItemId::new(format!("{prefix}-{:02}", i + 1)),
            hex: hex.to_string(),
            label: label.map(str::to_string),
        })
        .collect()
}

const FM15_COLORS: [&str; 15] = [
    "#FF0000", "#FF5500", "#FFAA00", "#FFFF00", "#AAFF00", "#55FF00", "#00FF00", "#00FF55",
    "#00FFAA", "#00FFFF", "#00AAFF", "#0055FF", "#0000FF", "#5500FF", "#AA00FF",
];

const ECDIS_HUE_COLORS: [&str; 8] = [
    "#FF4444", "#FFAA00", "#FFFFA8", "#44FF44", "#4E9ED9", "#0076BF", "#1E3C66", "#000A1A",
];

static FM15: LazyLock<Arc<Catalog<Swatch>>> = LazyLock::new(|| {
    let colors: Vec<_> = FM15_COLORS.iter().map(|&hex| (hex, None)).collect();
    builtin(QuizKind::Hue, "FM15 hue arrangement", swatches("fm", &colors))
});

static ECDIS_HUE: LazyLock<Arc<Catalog<Swatch>>> = LazyLock::new(|| {
    let colors: Vec<_> = ECDIS_HUE_COLORS.iter().map(|&hex| (hex, None)).collect();
    builtin(QuizKind::Hue, "ECDIS hue arrangement", swatches("eh", &colors))
});

/// 15 spectral swatches, red through violet.
pub fn fm15() -> Arc<Catalog<Swatch>> {
    Arc::clone(&FM15)
}

/// 8 swatches drawn from the ECDIS palettes, warm to dark.
pub fn ecdis_hue() -> Arc<Catalog<Swatch>> {
    Arc::clone(&ECDIS_HUE)
}

// ---------------------------------------------------------------------------
// Radar battery
// ---------------------------------------------------------------------------

/// The four subtests of the radar battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RadarSubtest {
    SameDifferent,
    Ordering,
    Contrast,
    CountEstimate,
}

impl fmt::Display for RadarSubtest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RadarSubtest::SameDifferent => write!(f, "same/different"),
            RadarSubtest::Ordering => write!(f, "intensity ordering"),
            RadarSubtest::Contrast => write!(f, "contrast detection"),
            RadarSubtest::CountEstimate => write!(f, "count estimation"),
        }
    }
}

/// What a radar probe shows and what the truthful answer is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeStimulus {
    /// Two echo colours; the participant says whether they are identical.
    SameDifferent { first: String, second: String },
    /// A target drawn on a background; the participant says whether a target
    /// is visible.
    Contrast {
        target: String,
        background: String,
        present: bool,
    },
    /// A sweep with several targets; the participant estimates the count.
    CountEstimate { true_count: u32 },
}

/// One judgement item of the radar battery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadarProbe {
    pub id: ItemId,
    pub prompt: String,
    pub stimulus: ProbeStimulus,
}

impl RadarProbe {
    pub fn subtest(&self) -> RadarSubtest {
        match self.stimulus {
            ProbeStimulus::SameDifferent { .. } => RadarSubtest::SameDifferent,
            ProbeStimulus::Contrast { .. } => RadarSubtest::Contrast,
            ProbeStimulus::CountEstimate { .. } => RadarSubtest::CountEstimate,
        }
    }
}

impl QuizItem for RadarProbe {
    fn id(&self) -> &ItemId {
        &self.id
    }
}

fn same_different(n: usize, first: &str, second: &str) -> RadarProbe {
    RadarProbe {
        id: ItemId::new(format!("radar-same-{n}")),
        prompt: "Are these two echo colours the same?".to_string(),
        stimulus: ProbeStimulus::SameDifferent {
            first: first.to_string(),
            second: second.to_string(),
        },
    }
}

fn contrast(n: usize, target: &str, background: &str, present: bool) -> RadarProbe {
    RadarProbe {
        id: ItemId::new(format!("radar-contrast-{n}")),
        prompt: "Is there a target on this part of the display?".to_string(),
        stimulus: ProbeStimulus::Contrast {
            target: target.to_string(),
            background: background.to_string(),
            present,
        },
    }
}

fn count_estimate(n: usize, true_count: u32) -> RadarProbe {
    RadarProbe {
        id: ItemId::new(format!("radar-count-{n}")),
        prompt: "How many targets are shown on this sweep?".to_string(),
        stimulus: ProbeStimulus::CountEstimate { true_count },
    }
}

static RADAR_PROBES: LazyLock<Arc<Catalog<RadarProbe>>> = LazyLock::new(|| {
    let probes = vec![
        same_different(1, "#00FF00", "#00FF00"),
        same_different(2, "#FFB000", "#FFA000"),
        same_different(3, "#FF0000", "#FF0000"),
        same_different(4, "#00C8FF", "#00B4FF"),
        contrast(1, "#00FF00", "#001000", true),
        contrast(2, "#003000", "#002800", true),
        contrast(3, "#001000", "#001000", false),
        contrast(4, "#FFFF00", "#202000", true),
        count_estimate(1, 3),
        count_estimate(2, 7),
    ];
    builtin(QuizKind::Radar, "Radar judgement probes", probes)
});

const RADAR_INTENSITY: [(&str, &str); 6] = [
    ("#003300", "very weak echo"),
    ("#006600", "weak echo"),
    ("#00AA00", "moderate echo"),
    ("#AAFF00", "strong echo"),
    ("#FFCC00", "very strong echo"),
    ("#FF3300", "saturated echo"),
];

static RADAR_SCALE: LazyLock<Arc<Catalog<Swatch>>> = LazyLock::new(|| {
    let colors: Vec<_> = RADAR_INTENSITY
        .iter()
        .map(|&(hex, label)| (hex, Some(label)))
        .collect();
    builtin(QuizKind::Radar, "Radar echo intensity scale", swatches("intensity", &colors))
});

/// Same/different, contrast and count-estimation probes.
pub fn radar_probes() -> Arc<Catalog<RadarProbe>> {
    Arc::clone(&RADAR_PROBES)
}

/// Echo intensity levels, weakest first.
pub fn radar_intensity_scale() -> Arc<Catalog<Swatch>> {
    Arc::clone(&RADAR_SCALE)
}
