use std::fmt;
use tracing::debug;

use super::rules::Matcher::{Substr, Token};
use super::rules::{Rule, first_match};
use super::text_normalizer::NormalizedId;

/// Top-level feature categories with a fixed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Group {
    Processor,
    Ram,
    Storage,
    Display,
    Battery,
    Camera,
    Material,
    Weight,
    Charging,
    Network,
    Design,
    Features,
    Os,
    Product,
    Multimedia,
    Basics,
}

impl Group {
    pub const ALL: [Group; 16] = [
        Group::Processor,
        Group::Ram,
        Group::Storage,
        Group::Display,
        Group::Battery,
        Group::Camera,
        Group::Material,
        Group::Weight,
        Group::Charging,
        Group::Network,
        Group::Design,
        Group::Features,
        Group::Os,
        Group::Product,
        Group::Multimedia,
        Group::Basics,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Group::Processor => "processor",
            Group::Ram => "ram",
            Group::Storage => "storage",
            Group::Display => "display",
            Group::Battery => "battery",
            Group::Camera => "camera",
            Group::Material => "material",
            Group::Weight => "weight",
            Group::Charging => "charging",
            Group::Network => "network",
            Group::Design => "design",
            Group::Features => "features",
            Group::Os => "os",
            Group::Product => "product",
            Group::Multimedia => "multimedia",
            Group::Basics => "basics",
        }
    }
}

/// A feature's top-level category. Identifiers no rule recognizes get a
/// synthesized key taken from their first normalized token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Known(Group),
    Fallback(String),
}

/// Key used for identifiers that contain no tokens at all.
pub const EMPTY_FALLBACK_KEY: &str = "other";

impl GroupKey {
    pub fn as_str(&self) -> &str {
        match self {
            GroupKey::Known(group) => group.key(),
            GroupKey::Fallback(key) => key,
        }
    }

    pub fn known(&self) -> Option<Group> {
        match self {
            GroupKey::Known(group) => Some(*group),
            GroupKey::Fallback(_) => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, GroupKey::Fallback(_))
    }
}

impl From<Group> for GroupKey {
    fn from(group: Group) -> Self {
        GroupKey::Known(group)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Order matters: camera, display and battery claim identifiers that also
// mention charging, resolution or storage words.
pub const GROUP_RULES: &[Rule<Group>] = &[
    Rule {
        any_of: &[
            Substr("kamera"),
            Substr("camera"),
            Substr("video"),
            Substr("selfie"),
            Token("fps"),
            Token("ois"),
        ],
        result: Group::Camera,
    },
    Rule {
        any_of: &[
            Substr("ekran"),
            Substr("display"),
            Substr("screen"),
            Substr("panel"),
            Substr("yenileme hizi"),
            Substr("piksel"),
            Token("ppi"),
        ],
        result: Group::Display,
    },
    Rule {
        any_of: &[Substr("batarya"), Substr("battery"), Token("pil"), Token("mah")],
        result: Group::Battery,
    },
    Rule {
        any_of: &[Substr("sarj"), Substr("charg"), Substr("adaptor")],
        result: Group::Charging,
    },
    Rule {
        any_of: &[
            Substr("islemci"),
            Substr("processor"),
            Token("cpu"),
            Token("gpu"),
            Token("npu"),
            Token("soc"),
            Substr("chipset"),
            Substr("yonga"),
            Substr("cekirde"),
            Substr("antutu"),
            Substr("grafik"),
        ],
        result: Group::Processor,
    },
    Rule {
        any_of: &[
            Substr("depolama"),
            Substr("storage"),
            Substr("dahili"),
            Substr("hafiza"),
            Substr("microsd"),
            Token("ssd"),
            Token("hdd"),
            Token("ufs"),
            Token("emmc"),
        ],
        result: Group::Storage,
    },
    Rule {
        any_of: &[Token("ram"), Substr("bellek"), Token("memory"), Substr("ddr")],
        result: Group::Ram,
    },
    Rule {
        any_of: &[
            Substr("baglanti"),
            Substr("network"),
            Substr("bluetooth"),
            Substr("wifi"),
            Substr("wi fi"),
            Substr("hucresel"),
            Token("ag"),
            Token("5g"),
            Token("4g"),
            Token("3g"),
            Token("lte"),
            Token("nfc"),
            Token("gps"),
            Token("sim"),
            Token("usb"),
        ],
        result: Group::Network,
    },
    Rule {
        any_of: &[
            Substr("isletim"),
            Substr("operating"),
            Substr("arayuz"),
            Token("android"),
            Token("ios"),
            Token("os"),
        ],
        result: Group::Os,
    },
    Rule {
        any_of: &[Substr("agirl"), Substr("weight"), Token("gram")],
        result: Group::Weight,
    },
    Rule {
        any_of: &[Substr("malzeme"), Substr("material"), Substr("govde"), Substr("cerceve")],
        result: Group::Material,
    },
    Rule {
        any_of: &[
            Substr("tasarim"),
            Substr("design"),
            Substr("renk"),
            Substr("rengi"),
            Substr("kalinl"),
            Substr("boyut"),
            Substr("genisl"),
            Substr("yuksekl"),
        ],
        result: Group::Design,
    },
    Rule {
        any_of: &[
            Substr("multimedya"),
            Substr("multimedia"),
            Substr("hoparlor"),
            Substr("speaker"),
            Substr("kulakl"),
            Substr("audio"),
            Substr("radyo"),
            Substr("dolby"),
            Token("ses"),
        ],
        result: Group::Multimedia,
    },
    Rule {
        any_of: &[
            Substr("ozelli"),
            Substr("feature"),
            Substr("suya"),
            Substr("dayanikli"),
            Substr("parmak izi"),
            Substr("yuz tanima"),
            Substr("sensor"),
            Token("ip67"),
            Token("ip68"),
        ],
        result: Group::Features,
    },
    Rule {
        any_of: &[Token("urun"), Substr("marka"), Substr("brand"), Substr("product"), Token("model")],
        result: Group::Product,
    },
    Rule {
        any_of: &[Substr("temel"), Substr("basic"), Substr("cikis yili"), Token("yil")],
        result: Group::Basics,
    },
];

/// Assign a feature identifier to its top-level group.
///
/// Total: an identifier no rule recognizes is grouped under its own first
/// token, and one without tokens under [`EMPTY_FALLBACK_KEY`].
pub fn classify_group(feature: &str) -> GroupKey {
    classify_normalized(&NormalizedId::new(feature))
}

pub fn classify_normalized(id: &NormalizedId) -> GroupKey {
    if let Some(group) = first_match(GROUP_RULES, id) {
        return GroupKey::Known(group);
    }

    let key = id.first_token().unwrap_or(EMPTY_FALLBACK_KEY).to_string();
    debug!("No group rule matched '{}', using fallback key '{}'", id.phrase(), key);
    GroupKey::Fallback(key)
}
