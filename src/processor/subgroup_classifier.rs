use std::fmt;

use super::group_classifier::{Group, GroupKey};
use super::rules::Matcher::{self, Substr, Token};
use super::rules::{Rule, any_matches, first_match};
use super::text_normalizer::NormalizedId;

/// Second-level tag inside a group. Each group uses its own subset, listed by
/// [`subgroup_priority`]; `Other` is reachable from every group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Subgroup {
    // processor
    Cpu,
    Gpu,
    Coprocessor,
    Chipset,
    // shared between ram, storage and battery
    Capacity,
    Type,
    Speed,
    Expansion,
    // display
    Size,
    Resolution,
    RefreshRate,
    Technology,
    Brightness,
    Protection,
    // battery
    Charging,
    Duration,
    // charging
    Wired,
    Wireless,
    Reverse,
    Adapter,
    // camera
    Rear,
    Front,
    Video,
    Stabilization,
    // material
    Body,
    Frame,
    Back,
    // weight
    Device,
    Package,
    // network
    Cellular,
    Wifi,
    Bluetooth,
    Nfc,
    Positioning,
    // os
    Platform,
    Version,
    Interface,
    Updates,
    // design
    Dimensions,
    Color,
    Form,
    // features
    Durability,
    Security,
    Sensors,
    // product and basics
    Brand,
    Model,
    Release,
    // multimedia
    Audio,
    Headphone,
    Radio,
    Other,
}

impl Subgroup {
    pub fn key(&self) -> &'static str {
        match self {
            Subgroup::Cpu => "cpu",
            Subgroup::Gpu => "gpu",
            Subgroup::Coprocessor => "coprocessor",
            Subgroup::Chipset => "chipset",
            Subgroup::Capacity => "capacity",
            Subgroup::Type => "type",
            Subgroup::Speed => "speed",
            Subgroup::Expansion => "expansion",
            Subgroup::Size => "size",
            Subgroup::Resolution => "resolution",
            Subgroup::RefreshRate => "refresh_rate",
            Subgroup::Technology => "technology",
            Subgroup::Brightness => "brightness",
            Subgroup::Protection => "protection",
            Subgroup::Charging => "charging",
            Subgroup::Duration => "duration",
            Subgroup::Wired => "wired",
            Subgroup::Wireless => "wireless",
            Subgroup::Reverse => "reverse",
            Subgroup::Adapter => "adapter",
            Subgroup::Rear => "rear",
            Subgroup::Front => "front",
            Subgroup::Video => "video",
            Subgroup::Stabilization => "stabilization",
            Subgroup::Body => "body",
            Subgroup::Frame => "frame",
            Subgroup::Back => "back",
            Subgroup::Device => "device",
            Subgroup::Package => "package",
            Subgroup::Cellular => "cellular",
            Subgroup::Wifi => "wifi",
            Subgroup::Bluetooth => "bluetooth",
            Subgroup::Nfc => "nfc",
            Subgroup::Positioning => "positioning",
            Subgroup::Platform => "platform",
            Subgroup::Version => "version",
            Subgroup::Interface => "interface",
            Subgroup::Updates => "updates",
            Subgroup::Dimensions => "dimensions",
            Subgroup::Color => "color",
            Subgroup::Form => "form",
            Subgroup::Durability => "durability",
            Subgroup::Security => "security",
            Subgroup::Sensors => "sensors",
            Subgroup::Brand => "brand",
            Subgroup::Model => "model",
            Subgroup::Release => "release",
            Subgroup::Audio => "audio",
            Subgroup::Headphone => "headphone",
            Subgroup::Radio => "radio",
            Subgroup::Other => "other",
        }
    }
}

impl fmt::Display for Subgroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// Processor detection uses disjoint keyword sets, checked most specific first:
// "yardimci islemci" and "grafik islemci" must not land in the CPU bucket.
const COPROCESSOR_KEYWORDS: &[Matcher] = &[
    Substr("yardimci"),
    Substr("coprocessor"),
    Substr("yapay zeka"),
    Substr("neural"),
    Token("npu"),
    Token("ai"),
];
const GPU_KEYWORDS: &[Matcher] = &[
    Token("gpu"),
    Substr("grafik"),
    Substr("graphics"),
    Substr("adreno"),
    Token("mali"),
];
const CHIPSET_KEYWORDS: &[Matcher] = &[
    Substr("chipset"),
    Substr("yonga"),
    Substr("platform"),
    Token("soc"),
];
const CPU_KEYWORDS: &[Matcher] = &[
    Token("cpu"),
    Substr("islemci"),
    Substr("cekirde"),
    Substr("frekans"),
    Substr("uretim teknolojisi"),
    Substr("mimari"),
    Token("ghz"),
];

const RAM_RULES: &[Rule<Subgroup>] = &[
    Rule { any_of: &[Substr("sanal"), Substr("genisletil"), Substr("virtual")], result: Subgroup::Expansion },
    Rule { any_of: &[Token("tipi"), Token("tip"), Substr("turu"), Substr("ddr")], result: Subgroup::Type },
    Rule { any_of: &[Substr("hiz"), Substr("frekans"), Token("mhz")], result: Subgroup::Speed },
    Rule {
        any_of: &[Substr("kapasite"), Substr("boyut"), Substr("bellek"), Token("ram"), Token("gb")],
        result: Subgroup::Capacity,
    },
];

const STORAGE_RULES: &[Rule<Subgroup>] = &[
    Rule {
        any_of: &[Substr("kart"), Substr("microsd"), Substr("harici"), Substr("genisletil")],
        result: Subgroup::Expansion,
    },
    Rule {
        any_of: &[Token("tipi"), Token("tip"), Substr("turu"), Token("ufs"), Token("emmc"), Token("ssd"), Token("nvme"), Token("hdd")],
        result: Subgroup::Type,
    },
    Rule { any_of: &[Substr("hiz"), Substr("okuma"), Substr("yazma")], result: Subgroup::Speed },
    Rule {
        any_of: &[Substr("kapasite"), Substr("dahili"), Substr("depolama"), Substr("storage"), Substr("hafiza")],
        result: Subgroup::Capacity,
    },
];

const DISPLAY_RULES: &[Rule<Subgroup>] = &[
    Rule { any_of: &[Substr("yenileme"), Substr("refresh"), Token("hz")], result: Subgroup::RefreshRate },
    Rule {
        any_of: &[Substr("cozunurlu"), Substr("piksel"), Substr("resolution"), Substr("aspect"), Token("ppi")],
        result: Subgroup::Resolution,
    },
    Rule { any_of: &[Substr("boyut"), Substr("size"), Substr("inc")], result: Subgroup::Size },
    Rule { any_of: &[Substr("parlakl"), Substr("brightness"), Token("nit"), Token("hdr")], result: Subgroup::Brightness },
    Rule { any_of: &[Substr("koruma"), Substr("gorilla"), Token("cam")], result: Subgroup::Protection },
    Rule {
        any_of: &[Substr("teknoloji"), Substr("panel"), Substr("oled"), Token("lcd"), Token("ips")],
        result: Subgroup::Technology,
    },
];

const BATTERY_RULES: &[Rule<Subgroup>] = &[
    Rule { any_of: &[Substr("sarj"), Substr("charg"), Token("watt"), Token("w")], result: Subgroup::Charging },
    Rule {
        any_of: &[Substr("sure"), Substr("omru"), Substr("kullanim"), Substr("dayanma")],
        result: Subgroup::Duration,
    },
    Rule {
        any_of: &[Substr("teknoloji"), Token("tipi"), Substr("lityum"), Substr("polimer"), Token("ion")],
        result: Subgroup::Technology,
    },
    Rule { any_of: &[Substr("kapasite"), Substr("capacity"), Token("mah")], result: Subgroup::Capacity },
];

const CHARGING_RULES: &[Rule<Subgroup>] = &[
    Rule { any_of: &[Substr("ters"), Substr("reverse")], result: Subgroup::Reverse },
    Rule { any_of: &[Substr("kablosuz"), Substr("wireless"), Token("qi")], result: Subgroup::Wireless },
    Rule { any_of: &[Substr("adaptor"), Substr("sarj aleti"), Substr("kutu")], result: Subgroup::Adapter },
    Rule {
        any_of: &[Substr("kablolu"), Substr("hizli"), Substr("guc"), Token("watt"), Token("usb")],
        result: Subgroup::Wired,
    },
];

const CAMERA_RULES: &[Rule<Subgroup>] = &[
    Rule { any_of: &[Substr("video"), Token("fps"), Substr("kayit")], result: Subgroup::Video },
    Rule {
        any_of: &[Substr("sabitleyici"), Substr("stabiliz"), Token("ois"), Token("eis")],
        result: Subgroup::Stabilization,
    },
    Rule { any_of: &[Substr("on kamera"), Substr("selfie"), Substr("front")], result: Subgroup::Front },
    Rule {
        any_of: &[
            Substr("arka"),
            Substr("rear"),
            Token("ana"),
            Substr("genis"),
            Substr("tele"),
            Substr("makro"),
            Substr("cozunurlu"),
            Substr("diyafram"),
            Substr("zoom"),
        ],
        result: Subgroup::Rear,
    },
];

const MATERIAL_RULES: &[Rule<Subgroup>] = &[
    Rule { any_of: &[Substr("kapak"), Substr("kapag"), Substr("arka"), Substr("back")], result: Subgroup::Back },
    Rule { any_of: &[Substr("cerceve"), Substr("frame")], result: Subgroup::Frame },
    Rule { any_of: &[Substr("govde"), Substr("kasa"), Substr("body")], result: Subgroup::Body },
];

const WEIGHT_RULES: &[Rule<Subgroup>] = &[
    Rule { any_of: &[Substr("paket"), Substr("kutu"), Substr("package")], result: Subgroup::Package },
    Rule { any_of: &[Substr("agirl"), Substr("weight"), Token("gram")], result: Subgroup::Device },
];

const NETWORK_RULES: &[Rule<Subgroup>] = &[
    Rule { any_of: &[Substr("bluetooth")], result: Subgroup::Bluetooth },
    Rule { any_of: &[Substr("wifi"), Substr("wi fi"), Token("wlan")], result: Subgroup::Wifi },
    Rule { any_of: &[Token("nfc")], result: Subgroup::Nfc },
    Rule { any_of: &[Token("gps"), Substr("glonass"), Substr("konum")], result: Subgroup::Positioning },
    Rule {
        any_of: &[Token("5g"), Token("4g"), Token("3g"), Token("lte"), Token("sim"), Substr("hucresel"), Substr("ag baglanti")],
        result: Subgroup::Cellular,
    },
];

const OS_RULES: &[Rule<Subgroup>] = &[
    Rule { any_of: &[Substr("guncelleme"), Substr("update"), Substr("deste")], result: Subgroup::Updates },
    Rule { any_of: &[Substr("arayuz"), Substr("interface"), Token("ui")], result: Subgroup::Interface },
    Rule { any_of: &[Substr("surum"), Substr("versiyon"), Substr("version")], result: Subgroup::Version },
    Rule {
        any_of: &[Substr("isletim"), Substr("sistem"), Token("android"), Token("ios"), Token("os")],
        result: Subgroup::Platform,
    },
];

const DESIGN_RULES: &[Rule<Subgroup>] = &[
    Rule { any_of: &[Substr("renk"), Substr("rengi"), Substr("color")], result: Subgroup::Color },
    Rule { any_of: &[Substr("katlanabilir"), Substr("form"), Substr("ergonomi")], result: Subgroup::Form },
    Rule {
        any_of: &[Substr("kalinl"), Substr("genisl"), Substr("yuksekl"), Substr("boyut")],
        result: Subgroup::Dimensions,
    },
];

const FEATURES_RULES: &[Rule<Subgroup>] = &[
    Rule {
        any_of: &[Substr("suya"), Substr("toz"), Substr("dayanikli"), Token("ip67"), Token("ip68")],
        result: Subgroup::Durability,
    },
    Rule {
        any_of: &[Substr("parmak"), Substr("yuz tanima"), Substr("kilit"), Substr("guvenlik")],
        result: Subgroup::Security,
    },
    Rule {
        any_of: &[Substr("sensor"), Substr("ivmeolcer"), Substr("jiroskop"), Substr("pusula")],
        result: Subgroup::Sensors,
    },
];

const PRODUCT_RULES: &[Rule<Subgroup>] = &[
    Rule { any_of: &[Substr("marka"), Substr("brand")], result: Subgroup::Brand },
    Rule { any_of: &[Token("model"), Substr("seri")], result: Subgroup::Model },
    Rule { any_of: &[Substr("cikis"), Token("yil"), Substr("yili"), Substr("tarih")], result: Subgroup::Release },
];

const MULTIMEDIA_RULES: &[Rule<Subgroup>] = &[
    Rule { any_of: &[Substr("kulakl"), Substr("jack")], result: Subgroup::Headphone },
    Rule { any_of: &[Substr("radyo"), Token("fm")], result: Subgroup::Radio },
    Rule {
        any_of: &[Substr("hoparlor"), Substr("speaker"), Substr("stereo"), Substr("dolby"), Token("ses")],
        result: Subgroup::Audio,
    },
];

const BASICS_RULES: &[Rule<Subgroup>] = &[
    Rule {
        any_of: &[Substr("cikis"), Substr("duyuru"), Token("yil"), Substr("yili"), Substr("tarih")],
        result: Subgroup::Release,
    },
];

/// Assign a subgroup within `group`. Always returns a value; identifiers no
/// rule recognizes land in [`Subgroup::Other`].
pub fn classify_subgroup(group: &GroupKey, feature: &str) -> Subgroup {
    classify_subgroup_normalized(group, &NormalizedId::new(feature))
}

pub fn classify_subgroup_normalized(group: &GroupKey, id: &NormalizedId) -> Subgroup {
    let group = match group {
        GroupKey::Known(group) => *group,
        GroupKey::Fallback(_) => return Subgroup::Other,
    };

    if group == Group::Processor {
        return detect_processor_part(id);
    }

    first_match(subgroup_rules(group), id).unwrap_or(Subgroup::Other)
}

/// CPU, GPU, coprocessor or chipset detection for processor features.
pub fn detect_processor_part(id: &NormalizedId) -> Subgroup {
    if any_matches(COPROCESSOR_KEYWORDS, id) {
        Subgroup::Coprocessor
    } else if any_matches(GPU_KEYWORDS, id) {
        Subgroup::Gpu
    } else if any_matches(CHIPSET_KEYWORDS, id) {
        Subgroup::Chipset
    } else if any_matches(CPU_KEYWORDS, id) {
        Subgroup::Cpu
    } else {
        Subgroup::Other
    }
}

fn subgroup_rules(group: Group) -> &'static [Rule<Subgroup>] {
    match group {
        Group::Processor => &[],
        Group::Ram => RAM_RULES,
        Group::Storage => STORAGE_RULES,
        Group::Display => DISPLAY_RULES,
        Group::Battery => BATTERY_RULES,
        Group::Camera => CAMERA_RULES,
        Group::Material => MATERIAL_RULES,
        Group::Weight => WEIGHT_RULES,
        Group::Charging => CHARGING_RULES,
        Group::Network => NETWORK_RULES,
        Group::Design => DESIGN_RULES,
        Group::Features => FEATURES_RULES,
        Group::Os => OS_RULES,
        Group::Product => PRODUCT_RULES,
        Group::Multimedia => MULTIMEDIA_RULES,
        Group::Basics => BASICS_RULES,
    }
}

/// Display order of a group's subgroups. `Other` is not listed; it always
/// comes last.
pub fn subgroup_priority(group: &GroupKey) -> &'static [Subgroup] {
    let Some(group) = group.known() else {
        return &[];
    };

    match group {
        Group::Processor => &[Subgroup::Cpu, Subgroup::Gpu, Subgroup::Coprocessor, Subgroup::Chipset],
        Group::Ram => &[Subgroup::Capacity, Subgroup::Type, Subgroup::Speed, Subgroup::Expansion],
        Group::Storage => &[Subgroup::Capacity, Subgroup::Type, Subgroup::Speed, Subgroup::Expansion],
        Group::Display => &[
            Subgroup::Size,
            Subgroup::Resolution,
            Subgroup::RefreshRate,
            Subgroup::Technology,
            Subgroup::Brightness,
            Subgroup::Protection,
        ],
        Group::Battery => &[Subgroup::Capacity, Subgroup::Charging, Subgroup::Duration, Subgroup::Technology],
        Group::Charging => &[Subgroup::Wired, Subgroup::Wireless, Subgroup::Reverse, Subgroup::Adapter],
        Group::Camera => &[Subgroup::Rear, Subgroup::Front, Subgroup::Video, Subgroup::Stabilization],
        Group::Material => &[Subgroup::Body, Subgroup::Frame, Subgroup::Back],
        Group::Weight => &[Subgroup::Device, Subgroup::Package],
        Group::Network => &[
            Subgroup::Cellular,
            Subgroup::Wifi,
            Subgroup::Bluetooth,
            Subgroup::Nfc,
            Subgroup::Positioning,
        ],
        Group::Os => &[Subgroup::Platform, Subgroup::Version, Subgroup::Interface, Subgroup::Updates],
        Group::Design => &[Subgroup::Dimensions, Subgroup::Color, Subgroup::Form],
        Group::Features => &[Subgroup::Durability, Subgroup::Security, Subgroup::Sensors],
        Group::Product => &[Subgroup::Brand, Subgroup::Model, Subgroup::Release],
        Group::Multimedia => &[Subgroup::Audio, Subgroup::Headphone, Subgroup::Radio],
        Group::Basics => &[Subgroup::Release],
    }
}
