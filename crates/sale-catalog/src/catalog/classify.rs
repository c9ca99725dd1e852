//! Category cleaning for imported records.
//!
//! Supplier feeds carry inconsistent or missing categories. Product names are
//! a better signal, so known keywords decide the category first and the raw
//! category is only used as a fallback.

/// Category given to products nothing else matches.
pub const OTHER: &str = "Outros";

const ELECTRONICS: &str = "Eletrônicos";
const HOME_KITCHEN: &str = "Casa e Cozinha";
const GAMING: &str = "Games";
const HEALTH_WELLNESS: &str = "Saúde e Bem-estar";
const SPORTS_LEISURE: &str = "Esportes e Lazer";
const ACCESSORIES: &str = "Acessórios";

/// Name keywords mapped to a category and subcategory.
struct Rule {
    keywords: &'static [&'static str],
    excludes: &'static [&'static str],
    category: &'static str,
    subcategory: &'static str,
}

const fn rule(
    keywords: &'static [&'static str],
    category: &'static str,
    subcategory: &'static str,
) -> Rule {
    Rule {
        keywords,
        excludes: &[],
        category,
        subcategory,
    }
}

/// Checked in order; the first match wins.
const RULES: &[Rule] = &[
    rule(
        &[
            "fone de ouvido", "airpods", "earbuds", "headset", "soundcore", "beats",
            "galaxy buds", "linkbuds", "1more evo", "caixa de som", "jbl flip", "jbl xtreme",
        ],
        ELECTRONICS,
        "Áudio",
    ),
    rule(
        &[
            "watch", "band", "amazfit", "fitbit", "garmin", "galaxy ring", "suunto", "polar",
        ],
        ELECTRONICS,
        "Wearables",
    ),
    rule(
        &["notebook", "macbook", "laptop", "xps", "thinkpad", "spectre"],
        ELECTRONICS,
        "Laptops",
    ),
    rule(
        &["tablet", "ipad", "galaxy tab", "fire max", "matepad", "kindle"],
        ELECTRONICS,
        "Tablets e E-readers",
    ),
    rule(
        &[
            "smartphone", "iphone", "galaxy s24", "galaxy z", "pixel 8", "motorola edge",
            "xiaomi 14", "rog phone",
        ],
        ELECTRONICS,
        "Smartphones",
    ),
    rule(
        &[
            "câmera", "gopro", "insta360", "powershot", "zv-e10", "dji action", "drone",
            "dji air", "dji mini", "dji avata",
        ],
        ELECTRONICS,
        "Câmeras e Drones",
    ),
    rule(&["projetor"], ELECTRONICS, "Projetores"),
    rule(
        &[
            "alexa", "echo dot", "google nest", "smart plug", "sensor movimento",
            "lâmpada wi-fi", "smart home", "ring video",
        ],
        ELECTRONICS,
        "Casa Inteligente",
    ),
    rule(
        &[
            "console", "nintendo switch", "playstation 5", "xbox", "steam deck", "controle",
            "dualsense", "rog ally",
        ],
        GAMING,
        "Consoles e Acessórios",
    ),
    rule(
        &["teclado", "mouse", "webcam", "apresentador sem fio", "monitor"],
        ELECTRONICS,
        "Periféricos de TI",
    ),
    rule(&["ssd", "cartão de memória"], ELECTRONICS, "Armazenamento"),
    rule(
        &["carregador", "power bank", "magic keyboard", "apple pencil"],
        ELECTRONICS,
        "Acessórios de Energia e Entrada",
    ),
    rule(&["air fryer", "fritadeira"], HOME_KITCHEN, "Fritadeiras Elétricas"),
    rule(
        &["pipoqueira", "chaleira", "nespresso", "robô aspirador"],
        HOME_KITCHEN,
        "Eletrodomésticos",
    ),
    rule(
        &["monitor de pressão", "balança digital", "almofada massageadora"],
        HEALTH_WELLNESS,
        "Dispositivos de Saúde",
    ),
    rule(&["mochila de hidratação"], SPORTS_LEISURE, "Acessórios Esportivos"),
    Rule {
        keywords: &["mochila"],
        excludes: &["hidratação"],
        category: ACCESSORIES,
        subcategory: "Bolsas e Mochilas",
    },
    rule(&["suporte para monitor"], ACCESSORIES, "Acessórios de Escritório"),
];

/// Raw category fragments recognised when no name keyword matched.
const KNOWN_CATEGORIES: &[(&[&str], &str)] = &[
    (&["eletrônicos", "eletronicos"], ELECTRONICS),
    (&["casa e cozinha"], HOME_KITCHEN),
    (&["esporte"], SPORTS_LEISURE),
];

impl Rule {
    fn matches(&self, name: &str) -> bool {
        self.keywords.iter().any(|k| name.contains(k))
            && !self.excludes.iter().any(|e| name.contains(e))
    }
}

/// Pick a `(category, subcategory)` for an imported record.
///
/// Name keywords win. Otherwise a recognised raw category is normalised and
/// keeps its raw subcategory. An unrecognised raw category is kept as given.
/// Blank values fall back to [`OTHER`].
pub fn clean_category(name: &str, category: &str, subcategory: &str) -> (String, String) {
    let name = name.trim().to_lowercase();
    let category = category.trim();
    let subcategory = subcategory.trim();

    if let Some(rule) = RULES.iter().find(|r| r.matches(&name)) {
        return (rule.category.to_string(), rule.subcategory.to_string());
    }

    let or_other = |s: &str| {
        if s.is_empty() {
            OTHER.to_string()
        } else {
            s.to_string()
        }
    };

    let raw = category.to_lowercase();
    match KNOWN_CATEGORIES
        .iter()
        .find(|(fragments, _)| fragments.iter().any(|f| raw.contains(f)))
    {
        Some((_, canonical)) => (canonical.to_string(), or_other(subcategory)),
        None => (or_other(category), or_other(subcategory)),
    }
}
