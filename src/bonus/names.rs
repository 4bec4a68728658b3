//! Catalog-facing names the rule tables match against.
//!
//! Values are the exact display strings of the game master data, so they are
//! kept verbatim; the constant names are for readers.

/// Fallback for every textual attribute of a unit id missing from the catalog.
pub const UNDEFINED: &str = "undefined";

pub mod gear {
    pub const TYPE96_FIGHTER: &str = "九六式艦戦";
    pub const TYPE96_FIGHTER_KAI: &str = "九六式艦戦改";
    pub const TYPE94_DCP: &str = "九四式爆雷投射機";
    pub const TYPE3_DCP: &str = "三式爆雷投射機";
    pub const TYPE3_DCP_CONCENTRATED: &str = "三式爆雷投射機 集中配備";
    pub const TYPE2_DEPTH_CHARGE: &str = "二式爆雷";
    pub const TYPE2_DEPTH_CHARGE_KAI2: &str = "二式爆雷改二";
    pub const TYPE93_PASSIVE_SONAR: &str = "九三式水中聴音機";
    pub const TYPE0_PASSIVE_SONAR: &str = "零式水中聴音機";
    pub const TYPE4_PASSIVE_SONAR: &str = "四式水中聴音機";
    pub const TYPE3_ACTIVE_SONAR: &str = "三式水中探信儀";
    pub const TYPE3_ACTIVE_SONAR_KAI: &str = "三式水中探信儀改";
    pub const KA_GO_AUTOGYRO: &str = "カ号観測機";
    pub const O_GO_AUTOGYRO_KAI: &str = "オ号観測機改";
    pub const O_GO_AUTOGYRO_KAI2: &str = "オ号観測機改二";
    pub const S51J: &str = "S-51J";
    pub const S51J_KAI: &str = "S-51J改";
    pub const TYPE3_LIAISON_ASW: &str = "三式指揮連絡機(対潜)";
    pub const TYPE3_LIAISON_KAI: &str = "三式指揮連絡機改";
    pub const TYPE97_931: &str = "九七式艦攻(九三一空)";
    pub const TYPE97_931_SKILLED: &str = "九七式艦攻(九三一空/熟練)";
    pub const TYPE97_KAI_PROTO_3E: &str = "九七式艦攻改 試製三号戊型(空六号電探改装備機)";
    pub const TYPE97_KAI_SKILLED_PROTO_3E: &str =
        "九七式艦攻改(熟練) 試製三号戊型(空六号電探改装備機)";
    pub const SKILLED_LOOKOUTS: &str = "熟練見張員";
    pub const TORPEDO_SQUADRON_LOOKOUTS: &str = "水雷戦隊 熟練見張員";
    pub const HA_12_7CM_SINGLE_LATE: &str = "12.7cm単装高角砲(後期型)";
    pub const HA_12_7CM_SINGLE_KAI2: &str = "12.7cm単装高角砲改二";
    pub const HA_12_7CM_TWIN_KAI2: &str = "12.7cm連装高角砲改二";
    pub const HA_12CM_SINGLE_E: &str = "12cm単装高角砲E型";
    pub const TWIN_12_7CM_A_KAI3_AAFD: &str = "12.7cm連装砲A型改三(戦時改修)+高射装置";
    pub const PROTO_LONG_12_7CM_A_KAI4: &str = "試製 長12.7cm連装砲A型改四";
    pub const TWIN_14CM_KAI: &str = "14cm連装砲改";
    pub const SINGLE_12CM_KAI2: &str = "12cm単装砲改二";
    pub const PROTO_15CM_ASW_ROCKET: &str = "試製15cm9連装対潜噴進砲";
    pub const S9_OSPREY: &str = "S9 Osprey";
    pub const JU87C_KAI2_KMX: &str = "Ju87C改二(KMX搭載機)";
    pub const JU87C_KAI2_KMX_SKILLED: &str = "Ju87C改二(KMX搭載機/熟練)";
    pub const ZUIUN_KAI2_634: &str = "瑞雲改二(六三四空)";
    pub const ZUIUN_KAI2_634_SKILLED: &str = "瑞雲改二(六三四空/熟練)";
    pub const SWORDFISH_FLOATPLANE: &str = "Swordfish(水上機型)";
    pub const SWORDFISH_MK3_KAI_FLOATPLANE: &str = "Swordfish Mk.III改(水上機型)";
    pub const SWORDFISH_MK3_KAI_FLOATPLANE_SKILLED: &str = "Swordfish Mk.III改(水上機型/熟練)";
    pub const SWORDFISH_MK2_KAI_RECON: &str = "Swordfish Mk.II改(水偵型)";
    pub const SEAFOX_KAI: &str = "Fairey Seafox改";
    pub const TENZAN_12A: &str = "天山一二型甲";
    pub const TENZAN_12A_KAI_RADAR: &str = "天山一二型甲改(空六号電探改装備機)";
    pub const TENZAN_12A_KAI_SKILLED_RADAR: &str = "天山一二型甲改(熟練/空六号電探改装備機)";
    pub const XF5U: &str = "XF5U";
    pub const TBM_3W_3S: &str = "TBM-3W+3S";
    pub const ARMORED_BOAT: &str = "装甲艇(AB艇)";
    pub const ARMED_DAIHATSU: &str = "武装大発";
    pub const BARRACUDA_MK2: &str = "Barracuda Mk.II";
    pub const BARRACUDA_MK3: &str = "Barracuda Mk.III";
    pub const ZERO_MODEL64_KMX: &str = "零式艦戦64型(複座KMX搭載機)";
    pub const MK32_ASW_TORPEDO: &str = "Mk.32 対潜魚雷(Mk.2落射機)";
    pub const HAYABUSA_II_KAI_20: &str = "一式戦 隼II型改(20戦隊)";
    pub const TYPE2_12CM_MORTAR_KAI: &str = "二式12cm迫撃砲改";
    pub const TYPE2_12CM_MORTAR_KAI_CONCENTRATED: &str = "二式12cm迫撃砲改 集中配備";
    pub const RUR4A_WEAPON_ALPHA_KAI: &str = "RUR-4A Weapon Alpha改";
    pub const SO3C_SEAMEW_KAI: &str = "SO3C Seamew改";
    pub const ASW_SHORT_TORPEDO_PROTO: &str = "対潜短魚雷(試作初期型)";
    pub const HEDGEHOG_EARLY: &str = "Hedgehog(初期型)";
}

/// Display/equip categories (third element of the equipment type tuple).
pub mod category {
    pub const SMALL_RADAR: &str = "小型電探";
    pub const LARGE_RADAR: &str = "大型電探";
    pub const LARGE_RADAR_II: &str = "大型電探(II)";
    pub const RECON_SEAPLANE: &str = "水上偵察機";
    pub const SEAPLANE_BOMBER: &str = "水上爆撃機";
}

/// Picture-book categories (second element of the equipment type tuple).
pub mod picture_book {
    pub const AUTOGYRO: i64 = 15;
    pub const HELICOPTER: i64 = 44;
}

pub mod class {
    pub const TAIYO: &str = "大鷹型";
    pub const KASUGA_MARU: &str = "春日丸級";
    pub const HOSHO: &str = "鳳翔型";
    pub const KATORI: &str = "香取型";
    pub const KUMA: &str = "球磨型";
    pub const NAGARA: &str = "長良型";
    pub const SENDAI: &str = "川内型";
    pub const AGANO: &str = "阿賀野型";
    pub const YUBARI: &str = "夕張型";
    pub const TENRYU: &str = "天龍型";
    pub const ISE: &str = "伊勢型";
    pub const KAGA: &str = "加賀型";
    pub const C_TESTE: &str = "C.Teste級";
    pub const GOTLAND: &str = "Gotland級";
    pub const MIZUHO: &str = "瑞穂型";
    pub const KAMOI: &str = "神威型";
    pub const SHOHO: &str = "祥鳳型";
    pub const RYUHO: &str = "龍鳳型";
    pub const CHITOSE: &str = "千歳型";
    pub const HIYO: &str = "飛鷹型";
    pub const SHOKAKU: &str = "翔鶴型";
    pub const TAIHO: &str = "大鳳型";
    pub const MIKURA: &str = "御蔵型";
    pub const AKIZUKI: &str = "秋月型";
    pub const MATSU: &str = "松型";
    pub const SHIMUSHU: &str = "占守型";
    pub const ETOROFU: &str = "択捉型";
}

pub mod ship_type {
    pub const ESCORT: &str = "海防艦";
    pub const DESTROYER: &str = "駆逐艦";
    pub const LIGHT_CRUISER: &str = "軽巡洋艦";
    pub const TRAINING_CRUISER: &str = "練習巡洋艦";
    pub const LIGHT_CARRIER: &str = "軽空母";
    pub const CARRIER: &str = "正規空母";
    pub const ARMORED_CARRIER: &str = "装甲空母";

    pub const CARRIERS: &[&str] = &[LIGHT_CARRIER, CARRIER, ARMORED_CARRIER];
}

pub mod nation {
    pub const JAPAN: &str = "日本";
    pub const USA: &str = "アメリカ";
    pub const UK: &str = "イギリス";
    pub const AUSTRALIA: &str = "オーストラリア";
}
