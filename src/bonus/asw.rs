//! Additive (ASW) rule engine.
//!
//! Every rule reads the profile independently and adds into one accumulator.
//! A rule fires when its trigger holds; each of its blocks then contributes
//! the effects of its first branch whose condition holds. Rule order only
//! affects the order of the contribution breakdown.

use serde::Serialize;
use tracing::trace;

use crate::bonus::attributes::Capability;
use crate::bonus::names::{class, gear, nation, ship_type};
use crate::bonus::predicate::Cond;
use crate::bonus::predicate::Cond::{
    All, Always, Class, ClassIn, Name, NameIn, Nation, NationIn, Not, Remodel, Remodel2,
    RemodelOrAbove, Type, TypeIn, Yomi, YomiIn,
};
use crate::bonus::profile::AttackerProfile;

/// What must be equipped for a rule to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Any copy of the named equipment; copies of all names count together.
    Gear(&'static [&'static str]),
    /// At least one item with any of the capabilities.
    Equipped(&'static [Capability]),
    /// The capability and at least one copy of the named equipment.
    Synergy(Capability, &'static str),
}

/// One additive term of a branch. `n` is the matched copy count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// `c * n`
    PerCount(i32),
    /// `c`
    Flat(i32),
    PerCountIf(Cond, i32),
    FlatIf(Cond, i32),
    /// +1 for every matched copy refined to at least the threshold.
    EachAtLeast(i32),
    /// +1 when the best matched copy is refined to at least the threshold.
    MaxAtLeast(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Branch {
    pub when: Cond,
    pub effects: &'static [Effect],
}

const fn on(when: Cond, effects: &'static [Effect]) -> Branch {
    Branch { when, effects }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AswRule {
    pub trigger: Trigger,
    /// Independent first-match chains.
    pub blocks: &'static [&'static [Branch]],
}

impl AswRule {
    pub fn label(&self) -> String {
        match self.trigger {
            Trigger::Gear(names) => names.join(" + "),
            Trigger::Equipped(capabilities) => capabilities
                .iter()
                .map(|capability| capability.label())
                .collect::<Vec<_>>()
                .join(" / "),
            Trigger::Synergy(capability, name) => format!("{} + {}", capability.label(), name),
        }
    }

    /// Equipment names the trigger matches on.
    pub fn gear_names(&self) -> Vec<&'static str> {
        match self.trigger {
            Trigger::Gear(names) => names.to_vec(),
            Trigger::Equipped(_) => Vec::new(),
            Trigger::Synergy(_, name) => vec![name],
        }
    }

    /// Every condition of every branch, including conditional effects.
    pub fn conditions(&self) -> impl Iterator<Item = &'static Cond> {
        let blocks: &'static [&'static [Branch]] = self.blocks;
        blocks.iter().flat_map(|block| {
            block.iter().flat_map(|branch| {
                std::iter::once(&branch.when).chain(branch.effects.iter().filter_map(
                    |effect| match effect {
                        Effect::PerCountIf(cond, _) | Effect::FlatIf(cond, _) => Some(cond),
                        _ => None,
                    },
                ))
            })
        })
    }

    fn matched(&self, unit: &AttackerProfile<'_>) -> Option<Matched> {
        match self.trigger {
            Trigger::Gear(names) => {
                let refinements: Vec<i32> = names
                    .iter()
                    .flat_map(|name| unit.refinements(name).iter().copied())
                    .collect();
                (!refinements.is_empty()).then_some(Matched { refinements })
            }
            Trigger::Equipped(capabilities) => capabilities
                .iter()
                .any(|&capability| unit.capabilities.has(capability))
                .then(|| Matched {
                    refinements: Vec::new(),
                }),
            Trigger::Synergy(capability, name) => {
                let refinements = unit.refinements(name);
                (unit.capabilities.has(capability) && !refinements.is_empty()).then(|| Matched {
                    refinements: refinements.to_vec(),
                })
            }
        }
    }

    /// This rule's contribution for `unit`; 0 when the trigger does not hold.
    pub fn contribution(&self, unit: &AttackerProfile<'_>) -> i32 {
        let Some(matched) = self.matched(unit) else {
            return 0;
        };
        self.blocks
            .iter()
            .filter_map(|block| block.iter().find(|branch| branch.when.holds(unit)))
            .flat_map(|branch| branch.effects.iter())
            .map(|effect| matched.apply(effect, unit))
            .sum()
    }
}

struct Matched {
    refinements: Vec<i32>,
}

impl Matched {
    fn count(&self) -> i32 {
        i32::try_from(self.refinements.len()).unwrap_or(i32::MAX)
    }

    fn apply(&self, effect: &Effect, unit: &AttackerProfile<'_>) -> i32 {
        match *effect {
            Effect::PerCount(coefficient) => coefficient * self.count(),
            Effect::Flat(value) => value,
            Effect::PerCountIf(cond, coefficient) if cond.holds(unit) => coefficient * self.count(),
            Effect::FlatIf(cond, value) if cond.holds(unit) => value,
            Effect::PerCountIf(..) | Effect::FlatIf(..) => 0,
            Effect::EachAtLeast(threshold) => {
                let reached = self.refinements.iter().filter(|&&level| level >= threshold).count();
                i32::try_from(reached).unwrap_or(i32::MAX)
            }
            Effect::MaxAtLeast(threshold) => self
                .refinements
                .iter()
                .max()
                .is_some_and(|&best| best >= threshold)
                .into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BonusContribution {
    /// 1-based position in [RULES].
    pub rule: usize,
    pub label: String,
    pub amount: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    pub total: i32,
    pub contributions: Vec<BonusContribution>,
}

/// Visit every non-zero rule contribution in rule order with its 1-based
/// rule number.
fn for_each_contribution(
    unit: &AttackerProfile<'_>,
    mut visit: impl FnMut(usize, &'static AswRule, i32),
) {
    for (index, rule) in RULES.iter().enumerate() {
        let amount = rule.contribution(unit);
        if amount == 0 {
            continue;
        }
        trace!(unit = unit.unit_id, rule = index + 1, amount, "asw contribution");
        visit(index + 1, rule, amount);
    }
}

/// Additive bonus of one unit.
pub fn evaluate(unit: &AttackerProfile<'_>) -> i32 {
    let mut total = 0;
    for_each_contribution(unit, |_, _, amount| total += amount);
    total
}

/// [evaluate] plus every non-zero rule contribution, in rule order.
pub fn explain(unit: &AttackerProfile<'_>) -> Breakdown {
    let mut breakdown = Breakdown::default();
    for_each_contribution(unit, |rule, entry, amount| {
        breakdown.total += amount;
        breakdown.contributions.push(BonusContribution {
            rule,
            label: entry.label(),
            amount,
        });
    });
    breakdown
}

const fn gears(names: &'static [&'static str], blocks: &'static [&'static [Branch]]) -> AswRule {
    AswRule {
        trigger: Trigger::Gear(names),
        blocks,
    }
}

const SONAR_TIER_A: &[&str] = &["かみかぜ", "はるかぜ", "しぐれ", "やまかぜ", "まいかぜ", "あさしも"];
const SONAR_TIER_B: &[&str] = &["うしお", "いかずち", "やまぐも", "いそかぜ", "はまかぜ", "きしなみ"];
const ACTIVE_SONAR_BRANCHES: &[Branch] = &[
    on(YomiIn(SONAR_TIER_A), &[PerCount(3)]),
    on(YomiIn(SONAR_TIER_B), &[PerCount(2)]),
];

const JAPANESE_DESTROYER: Cond = All(&[Nation(nation::JAPAN), Type(ship_type::DESTROYER)]);
const BRITISH_CARRIER: Cond = All(&[Nation(nation::UK), TypeIn(ship_type::CARRIERS)]);
const LIGHT_CRUISER_YOMI: &[&str] = &["いすず", "ゆら", "なか", "きぬ"];

use Effect::{EachAtLeast, Flat, FlatIf, MaxAtLeast, PerCount, PerCountIf};

/// The additive rule table, in authored order.
pub static RULES: &[AswRule] = &[
    // per-count rules
    gears(
        &[gear::TYPE96_FIGHTER],
        &[&[
            on(Class(class::TAIYO), &[PerCount(3)]),
            on(Class(class::HOSHO), &[PerCount(2), PerCountIf(Remodel2, 1)]),
        ]],
    ),
    gears(
        &[gear::TYPE94_DCP, gear::TYPE3_DCP],
        &[&[on(Class(class::KATORI), &[PerCount(3)])]],
    ),
    gears(&[gear::TYPE3_ACTIVE_SONAR], &[ACTIVE_SONAR_BRANCHES]),
    gears(
        &[gear::KA_GO_AUTOGYRO],
        &[&[
            on(Name("伊勢改二"), &[PerCount(1)]),
            on(Name("日向改二"), &[PerCount(2)]),
            on(Name("加賀改二護"), &[PerCount(2)]),
        ]],
    ),
    gears(
        &[gear::TYPE3_LIAISON_ASW],
        &[&[on(Yomi("やましおまる"), &[PerCount(1)])]],
    ),
    gears(&[gear::TYPE97_931], &[&[on(Class(class::TAIYO), &[PerCount(1)])]]),
    gears(&[gear::SKILLED_LOOKOUTS], &[&[on(JAPANESE_DESTROYER, &[PerCount(2)])]]),
    gears(
        &[gear::TYPE2_DEPTH_CHARGE],
        &[&[on(Always, &[EachAtLeast(8), EachAtLeast(10)])]],
    ),
    gears(
        &[gear::TYPE96_FIGHTER_KAI],
        &[
            &[
                on(ClassIn(&[class::TAIYO, class::KASUGA_MARU]), &[PerCount(5)]),
                on(Class(class::HOSHO), &[PerCount(4), PerCountIf(Remodel2, 2)]),
            ],
            &[on(Type(ship_type::LIGHT_CARRIER), &[PerCount(2)])],
        ],
    ),
    gears(
        &[gear::HA_12_7CM_SINGLE_LATE],
        &[&[on(Name("雪風改二"), &[PerCount(2)])]],
    ),
    gears(
        &[gear::TYPE3_DCP_CONCENTRATED],
        &[&[
            on(Class(class::KATORI), &[PerCount(3)]),
            on(Name("能代改二"), &[PerCount(3)]),
            on(
                NameIn(&["夕張改二丁", "五十鈴改二", "那珂改二", "由良改二", "雪風改二"]),
                &[PerCount(1)],
            ),
        ]],
    ),
    gears(
        &[gear::PROTO_15CM_ASW_ROCKET],
        &[&[
            on(Class(class::KATORI), &[PerCount(3)]),
            on(NameIn(&["五十鈴改二", "那珂改二", "由良改二", "雪風改二"]), &[PerCount(2)]),
            on(Name("夕張改二丁"), &[PerCount(3)]),
            on(Name("能代改二"), &[PerCount(4)]),
        ]],
    ),
    gears(
        &[gear::TWIN_12_7CM_A_KAI3_AAFD],
        &[&[on(Name("磯波改二"), &[PerCount(1)])]],
    ),
    gears(&[gear::TYPE97_931_SKILLED], &[&[on(Class(class::TAIYO), &[PerCount(1)])]]),
    gears(
        &[gear::S9_OSPREY],
        &[&[
            on(
                ClassIn(&[class::KUMA, class::NAGARA, class::SENDAI, class::AGANO]),
                &[PerCount(1)],
            ),
            on(Yomi("ゴトランド"), &[PerCount(2)]),
        ]],
    ),
    gears(
        &[gear::JU87C_KAI2_KMX, gear::JU87C_KAI2_KMX_SKILLED],
        &[
            &[on(Class(class::TAIYO), &[PerCount(1)])],
            &[on(Yomi("しんよう"), &[PerCount(2)])],
        ],
    ),
    gears(
        &[gear::TWIN_14CM_KAI],
        &[&[on(All(&[Class(class::YUBARI), Remodel2]), &[PerCount(1)])]],
    ),
    gears(
        &[gear::ZUIUN_KAI2_634],
        &[&[on(All(&[Class(class::ISE), Remodel2]), &[PerCount(1)])]],
    ),
    gears(
        &[gear::ZUIUN_KAI2_634_SKILLED],
        &[&[on(All(&[Class(class::ISE), Remodel2]), &[PerCount(2)])]],
    ),
    gears(
        &[gear::O_GO_AUTOGYRO_KAI, gear::O_GO_AUTOGYRO_KAI2],
        &[&[
            on(Name("伊勢改二"), &[PerCount(2)]),
            on(Name("日向改二"), &[PerCount(3)]),
            on(Name("加賀改二護"), &[PerCount(3)]),
        ]],
    ),
    gears(
        &[gear::S51J],
        &[&[
            on(Name("伊勢改二"), &[PerCount(3)]),
            on(Name("日向改二"), &[PerCount(4)]),
            on(Name("加賀改二護"), &[PerCount(5)]),
        ]],
    ),
    gears(
        &[gear::S51J_KAI],
        &[&[
            on(Name("伊勢改二"), &[PerCount(4)]),
            on(Name("日向改二"), &[PerCount(5)]),
            on(Name("加賀改二護"), &[PerCount(6)]),
        ]],
    ),
    gears(
        &[gear::TYPE97_KAI_PROTO_3E, gear::TYPE97_KAI_SKILLED_PROTO_3E],
        &[&[
            on(NameIn(&["龍鳳改", "祥鳳改"]), &[PerCount(1)]),
            on(NameIn(&["龍鳳改二", "龍鳳改二戊"]), &[PerCount(2)]),
            on(NameIn(&["瑞鳳改二", "瑞鳳改二乙"]), &[PerCount(2)]),
        ]],
    ),
    gears(
        &[gear::SWORDFISH_FLOATPLANE],
        &[&[
            on(Class(class::C_TESTE), &[PerCount(1)]),
            on(Class(class::GOTLAND), &[PerCount(1)]),
        ]],
    ),
    gears(
        &[gear::SWORDFISH_MK3_KAI_FLOATPLANE],
        &[&[
            on(Class(class::C_TESTE), &[PerCount(3)]),
            on(Class(class::GOTLAND), &[PerCount(3)]),
            on(Class(class::MIZUHO), &[PerCount(2)]),
            on(Class(class::KAMOI), &[PerCount(2)]),
        ]],
    ),
    gears(
        &[gear::SWORDFISH_MK3_KAI_FLOATPLANE_SKILLED],
        &[&[
            on(Class(class::C_TESTE), &[PerCount(3)]),
            on(Class(class::GOTLAND), &[PerCount(4)]),
            on(Class(class::MIZUHO), &[PerCount(2)]),
            on(Class(class::KAMOI), &[PerCount(2)]),
        ]],
    ),
    gears(
        &[gear::SWORDFISH_MK2_KAI_RECON],
        &[&[
            on(Class(class::C_TESTE), &[PerCount(3)]),
            on(Class(class::GOTLAND), &[PerCount(3)]),
            on(Class(class::MIZUHO), &[PerCount(2)]),
            on(Class(class::KAMOI), &[PerCount(2)]),
            on(Nation(nation::UK), &[PerCount(3)]),
        ]],
    ),
    gears(
        &[gear::SEAFOX_KAI],
        &[&[
            on(Class(class::C_TESTE), &[PerCount(1)]),
            on(Class(class::GOTLAND), &[PerCount(2)]),
            on(Nation(nation::UK), &[PerCount(1)]),
        ]],
    ),
    gears(
        &[gear::TENZAN_12A],
        &[&[
            on(Class(class::SHOHO), &[PerCount(1)]),
            on(Class(class::RYUHO), &[PerCount(1)]),
        ]],
    ),
    gears(
        &[gear::TENZAN_12A_KAI_RADAR],
        &[&[
            on(Class(class::SHOHO), &[PerCount(1), PerCountIf(Remodel2, 1)]),
            on(Class(class::RYUHO), &[PerCount(1), PerCountIf(RemodelOrAbove, 1)]),
        ]],
    ),
    gears(
        &[gear::TENZAN_12A_KAI_SKILLED_RADAR],
        &[&[
            on(
                Class(class::SHOHO),
                &[
                    PerCount(1),
                    PerCountIf(RemodelOrAbove, 1),
                    PerCountIf(Remodel2, 1),
                ],
            ),
            on(Class(class::RYUHO), &[PerCount(2), PerCountIf(RemodelOrAbove, 1)]),
            on(
                All(&[Class(class::CHITOSE), Type(ship_type::LIGHT_CARRIER)]),
                &[PerCountIf(RemodelOrAbove, 1)],
            ),
            on(NameIn(&["鈴谷改二航", "熊野改二航"]), &[PerCount(1)]),
        ]],
    ),
    gears(
        &[gear::XF5U],
        &[&[
            on(
                All(&[Nation(nation::USA), TypeIn(ship_type::CARRIERS)]),
                &[PerCount(3)],
            ),
            on(Class(class::KAGA), &[PerCount(1)]),
        ]],
    ),
    gears(
        &[gear::HA_12_7CM_SINGLE_KAI2],
        &[&[
            on(
                Class(class::YUBARI),
                &[PerCount(1), PerCountIf(Name("夕張改二丁"), 2)],
            ),
            on(YomiIn(LIGHT_CRUISER_YOMI), &[PerCount(1), PerCountIf(Remodel2, 1)]),
            on(All(&[Class(class::TENRYU), Remodel2]), &[PerCount(2)]),
            on(Name("雪風改二"), &[PerCount(2)]),
        ]],
    ),
    gears(
        &[gear::HA_12_7CM_TWIN_KAI2],
        &[&[
            on(
                Class(class::YUBARI),
                &[PerCount(1), PerCountIf(Name("夕張改二丁"), 2)],
            ),
            on(YomiIn(LIGHT_CRUISER_YOMI), &[PerCount(1), PerCountIf(Remodel2, 1)]),
            on(All(&[Class(class::TENRYU), Remodel2]), &[PerCount(2)]),
        ]],
    ),
    gears(
        &[gear::HA_12CM_SINGLE_E],
        &[&[on(Type(ship_type::ESCORT), &[PerCount(1)])]],
    ),
    gears(
        &[gear::TBM_3W_3S],
        &[&[
            on(Nation(nation::USA), &[PerCount(3)]),
            on(Name("加賀改二護"), &[PerCount(4)]),
        ]],
    ),
    gears(
        &[gear::ARMORED_BOAT, gear::ARMED_DAIHATSU],
        &[&[on(Yomi("あきつまる"), &[PerCount(1)])]],
    ),
    gears(
        &[gear::BARRACUDA_MK3],
        &[&[on(
            BRITISH_CARRIER,
            &[PerCount(2), EachAtLeast(2), EachAtLeast(6), EachAtLeast(10)],
        )]],
    ),
    gears(&[gear::TYPE3_ACTIVE_SONAR_KAI], &[ACTIVE_SONAR_BRANCHES]),
    gears(
        &[gear::ZERO_MODEL64_KMX],
        &[
            &[on(Class(class::TAIYO), &[PerCount(1)])],
            &[
                on(Yomi("うんよう"), &[PerCount(1)]),
                on(Yomi("たいげい・りゅうほう"), &[PerCount(2)]),
                on(Yomi("ほうしょう"), &[PerCount(2), PerCountIf(Remodel2, 1)]),
            ],
            &[on(Always, &[EachAtLeast(6), EachAtLeast(10)])],
        ],
    ),
    gears(
        &[gear::TYPE3_LIAISON_KAI],
        &[&[
            on(Yomi("やましおまる"), &[PerCount(3), EachAtLeast(3), EachAtLeast(8)]),
            on(Yomi("あきつまる"), &[PerCount(2), EachAtLeast(3), EachAtLeast(7)]),
        ]],
    ),
    gears(
        &[gear::PROTO_LONG_12_7CM_A_KAI4],
        &[&[
            on(Name("浦波改二"), &[PerCount(1)]),
            on(Name("磯波改二"), &[PerCount(1)]),
        ]],
    ),
    gears(
        &[gear::MK32_ASW_TORPEDO],
        &[&[
            on(
                Nation(nation::USA),
                &[PerCount(2), FlatIf(Name("Samuel B.Roberts Mk.II"), 1)],
            ),
            on(Nation(nation::UK), &[PerCount(1)]),
        ]],
    ),
    gears(
        &[gear::TYPE2_DEPTH_CHARGE_KAI2],
        &[
            &[on(
                All(&[
                    Nation(nation::JAPAN),
                    TypeIn(&[ship_type::ESCORT, ship_type::DESTROYER]),
                    Not(&Class(class::MIKURA)),
                ]),
                &[PerCount(1)],
            )],
            &[
                on(
                    Name("時雨改二"),
                    &[PerCount(5), EachAtLeast(5), EachAtLeast(9), EachAtLeast(10)],
                ),
                on(
                    NameIn(&["磯風乙改", "浜風乙改", "雪風改", "雪風改二", "丹陽", "時雨改"]),
                    &[PerCount(2), EachAtLeast(5), EachAtLeast(10)],
                ),
                on(
                    NameIn(&[
                        "扶桑改二",
                        "山城改二",
                        "響改",
                        "潮改二",
                        "冬月改",
                        "涼月改",
                        "初霜改二",
                        "矢矧改二",
                        "矢矧改二乙",
                        "時雨",
                    ]),
                    &[PerCount(1), EachAtLeast(5), EachAtLeast(10)],
                ),
            ],
        ],
    ),
    gears(
        &[gear::HAYABUSA_II_KAI_20],
        &[
            &[
                on(Yomi("やましおまる"), &[PerCount(1), PerCountIf(Remodel, 1)]),
                on(Yomi("あきつまる"), &[PerCount(1)]),
            ],
            &[on(Always, &[EachAtLeast(6)])],
        ],
    ),
    // presence rules
    AswRule {
        trigger: Trigger::Equipped(&[Capability::ReconSeaplane]),
        blocks: &[&[on(All(&[Class(class::AGANO), Remodel2]), &[Flat(3)])]],
    },
    AswRule {
        trigger: Trigger::Equipped(&[Capability::SeaplaneBomber]),
        blocks: &[&[on(All(&[Class(class::AGANO), Remodel2]), &[Flat(1)])]],
    },
    AswRule {
        trigger: Trigger::Equipped(&[Capability::Autogyro, Capability::Helicopter]),
        blocks: &[&[
            on(Name("能代改二"), &[Flat(4)]),
            on(NameIn(&["矢矧改二", "矢矧改二乙"]), &[Flat(3)]),
        ]],
    },
    AswRule {
        trigger: Trigger::Equipped(&[Capability::DomesticSonar]),
        blocks: &[&[on(Class(class::KATORI), &[Flat(2)])]],
    },
    gears(
        &[gear::TYPE0_PASSIVE_SONAR],
        &[&[on(Always, &[MaxAtLeast(5), MaxAtLeast(8), MaxAtLeast(10)])]],
    ),
    gears(
        &[gear::TYPE4_PASSIVE_SONAR],
        &[&[
            on(Class(class::AKIZUKI), &[Flat(1)]),
            on(
                NameIn(&["雪風改二", "五十鈴改二", "由良改二", "那珂改二", "夕張改二", "夕張改二特"]),
                &[Flat(1)],
            ),
            on(Name("夕張改二丁"), &[Flat(3)]),
            on(Name("能代改二"), &[Flat(2)]),
        ]],
    ),
    gears(
        &[gear::TYPE2_12CM_MORTAR_KAI],
        &[&[on(Yomi("やましおまる"), &[Flat(1)])]],
    ),
    gears(
        &[gear::TYPE2_12CM_MORTAR_KAI_CONCENTRATED],
        &[&[on(Yomi("やましおまる"), &[Flat(2)])]],
    ),
    gears(
        &[gear::RUR4A_WEAPON_ALPHA_KAI],
        &[&[
            on(Nation(nation::USA), &[Flat(2), FlatIf(Name("Fletcher Mk.II"), 1)]),
            on(NationIn(&[nation::UK, nation::AUSTRALIA]), &[Flat(1)]),
            on(NameIn(&["丹陽", "雪風改二"]), &[Flat(1)]),
        ]],
    ),
    gears(
        &[gear::TORPEDO_SQUADRON_LOOKOUTS],
        &[&[on(JAPANESE_DESTROYER, &[Flat(2)])]],
    ),
    gears(&[gear::SO3C_SEAMEW_KAI], &[&[on(Nation(nation::USA), &[Flat(1)])]]),
    gears(
        &[gear::TYPE3_ACTIVE_SONAR_KAI],
        &[
            &[
                on(NameIn(&["那珂改二", "由良改二", "五十鈴改二"]), &[Flat(1)]),
                on(YomiIn(&["みくら", "いしがき"]), &[Flat(1)]),
                on(JAPANESE_DESTROYER, &[Flat(1)]),
            ],
            &[on(
                YomiIn(&[
                    "うしお",
                    "まいかぜ",
                    "いそかぜ",
                    "はまかぜ",
                    "いかずち",
                    "やまぐも",
                    "うみかぜ",
                    "かわかぜ",
                    "すずかぜ",
                ]),
                &[Flat(1)],
            )],
            &[on(YomiIn(&["しぐれ", "やまかぜ", "かみかぜ", "はるかぜ"]), &[Flat(1)])],
            &[on(
                NameIn(&["時雨改二", "時雨改三", "春風改", "神風改", "朝霜改二", "山風改二", "山風改二丁"]),
                &[MaxAtLeast(4), MaxAtLeast(8)],
            )],
        ],
    ),
    gears(
        &[gear::ASW_SHORT_TORPEDO_PROTO],
        &[&[
            on(Nation(nation::USA), &[Flat(3), FlatIf(Name("Fletcher Mk.II"), 1)]),
            on(Nation(nation::UK), &[Flat(2)]),
            on(Nation(nation::AUSTRALIA), &[Flat(1)]),
            on(NameIn(&["丹陽", "雪風改二"]), &[Flat(1)]),
        ]],
    ),
    gears(
        &[gear::HEDGEHOG_EARLY],
        &[
            &[
                on(
                    TypeIn(&[
                        ship_type::DESTROYER,
                        ship_type::LIGHT_CRUISER,
                        ship_type::TRAINING_CRUISER,
                    ]),
                    &[Flat(1)],
                ),
                on(
                    Type(ship_type::ESCORT),
                    &[Flat(2), FlatIf(Class(class::MATSU), 1)],
                ),
            ],
            &[on(NationIn(&[nation::USA, nation::UK]), &[Flat(2)])],
        ],
    ),
    // synergy rules
    AswRule {
        trigger: Trigger::Synergy(Capability::SurfaceRadar, gear::SINGLE_12CM_KAI2),
        blocks: &[&[on(ClassIn(&[class::SHIMUSHU, class::ETOROFU]), &[Flat(1)])]],
    },
    AswRule {
        trigger: Trigger::Synergy(Capability::Autogyro, gear::TBM_3W_3S),
        blocks: &[&[on(Name("加賀改二護"), &[Flat(6)])]],
    },
    AswRule {
        trigger: Trigger::Synergy(Capability::Helicopter, gear::TBM_3W_3S),
        blocks: &[&[on(Name("加賀改二護"), &[Flat(4)])]],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonus::attributes::AttributeResolver;
    use crate::bonus::fixture;
    use crate::data::{loose_row, LooseNumber, MasterData};
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    fn profile<'a>(
        resolver: &AttributeResolver<'a>,
        unit: i64,
        gears: &[i64],
        levels: &[i64],
    ) -> AttackerProfile<'a> {
        AttackerProfile::build(
            resolver,
            &LooseNumber::from(unit),
            &loose_row(gears),
            &loose_row(levels),
        )
    }

    fn score(master: &MasterData, unit: i64, gears: &[i64], levels: &[i64]) -> i32 {
        let resolver = AttributeResolver::new(master);
        evaluate(&profile(&resolver, unit, gears, levels))
    }

    #[test]
    fn taiyo_class_type96_fighters_add_three_each() {
        let master = fixture::master();
        assert_eq!(score(&master, 526, &[19, 19], &[0, 0]), 6);
    }

    #[test]
    fn remodel_bonus_stacks_on_the_matching_branch() {
        let master = fixture::master();
        assert_eq!(score(&master, 89, &[19], &[0]), 2);
        assert_eq!(score(&master, 894, &[19], &[0]), 3);
        // 九六式艦戦改: 鳳翔型 4 + remodel 2, then the light carrier block adds 2.
        assert_eq!(score(&master, 894, &[228], &[0]), 8);
        assert_eq!(score(&master, 526, &[228], &[0]), 7);
    }

    #[test]
    fn no_equipment_scores_zero() {
        let master = fixture::master();
        assert_eq!(score(&master, 526, &[], &[]), 0);
        assert_eq!(score(&master, 526, &[0, -1, 0], &[0, 0, 0]), 0);
    }

    #[test]
    fn equipment_only_rules_still_apply_to_unknown_units() {
        let master = fixture::master();
        // 二式爆雷: +1 per copy at 8 or more, +1 more per copy at 10.
        assert_eq!(score(&master, 9999, &[227, 227, 227], &[7, 8, 10]), 3);
        assert_eq!(score(&master, 9999, &[19, 228], &[0, 0]), 0);
    }

    #[test]
    fn refinement_tiers_never_decrease_with_level() {
        let master = fixture::master();
        let mut previous = i32::MIN;
        for level in 0..=10 {
            let bonus = score(&master, 9999, &[227], &[level]);
            assert!(bonus >= previous, "level {level}: {bonus} < {previous}");
            previous = bonus;
        }
        assert_eq!(previous, 2);
    }

    #[test]
    fn independent_blocks_both_contribute() {
        let master = fixture::master();
        // 時雨改二 with two 二式爆雷改二: 2 (Japanese destroyer) + 10 + 2 + 1 + 1.
        assert_eq!(score(&master, 145, &[488, 488], &[5, 10]), 16);
        // 御蔵型 is excluded from the first block and named in no other branch.
        assert_eq!(score(&master, 611, &[488], &[10]), 0);
    }

    #[test]
    fn katori_rocket_launcher_adds_instead_of_overwriting() {
        let master = fixture::master();
        // depth charge projector 3 + rocket launcher 3 + domestic sonar 2
        assert_eq!(score(&master, 154, &[44, 288, 47], &[0, 0, 0]), 8);
    }

    #[test]
    fn synergy_needs_both_halves() {
        let master = fixture::master();
        assert_eq!(score(&master, 517, &[28, 293], &[0, 0]), 1);
        assert_eq!(score(&master, 517, &[27, 293], &[0, 0]), 0, "radar search stat too low");
        assert_eq!(score(&master, 517, &[28], &[0]), 0);
    }

    #[test]
    fn presence_rules_add_flat_amounts() {
        let master = fixture::master();
        // helicopter +4, recon seaplane +3, seaplane bomber +1
        assert_eq!(score(&master, 662, &[326], &[0]), 4);
        assert_eq!(score(&master, 662, &[326, 25, 26], &[0, 0, 0]), 8);
        assert_eq!(score(&master, 662, &[326, 25, 25], &[0, 0, 0]), 7);
    }

    #[test]
    fn flat_rule_bonus_for_a_named_unit() {
        let master = fixture::master();
        assert_eq!(score(&master, 689, &[377], &[0]), 3);
        assert_eq!(score(&master, 562, &[377], &[0]), 2);
        // destroyer +1 and American +2
        assert_eq!(score(&master, 562, &[439], &[0]), 3);
        // escort +2, 松型 +1
        assert_eq!(score(&master, 684, &[439], &[0]), 3);
    }

    #[test]
    fn best_copy_drives_max_refinement_tiers() {
        let master = fixture::master();
        assert_eq!(score(&master, 9999, &[132, 132], &[4, 8]), 2);
        assert_eq!(score(&master, 9999, &[132], &[10]), 3);
    }

    #[test]
    fn explain_lists_non_zero_contributions_in_rule_order() {
        let master = fixture::master();
        let resolver = AttributeResolver::new(&master);
        // 加賀改二護: カ号 2, TBM 4, autogyro + TBM 6
        let unit = profile(&resolver, 646, &[389, 69], &[0, 0]);
        let breakdown = explain(&unit);
        assert_eq!(breakdown.total, 12);
        assert_eq!(breakdown.total, evaluate(&unit));
        let amounts: Vec<(usize, i32)> = breakdown
            .contributions
            .iter()
            .map(|contribution| (contribution.rule, contribution.amount))
            .collect();
        assert_eq!(amounts, vec![(4, 2), (36, 4), (61, 6)]);
        assert_eq!(breakdown.contributions[2].label, "autogyro + TBM-3W+3S");
    }

    /// (unit, equipment, refinements, expected bonus), grouped by rule.
    const RULE_CASES: &[(i64, &[i64], &[i64], i32)] = &[
        // 三式水中探信儀改: 3n for しぐれ, then four stacking blocks.
        (145, &[438], &[8], 7),
        (145, &[438], &[5], 6),
        (145, &[438, 438], &[3, 8], 10),
        (407, &[438], &[0], 4),
        (611, &[438], &[0], 1),
        // Barracuda Mk.III: 2n plus per-copy tiers at 2, 6 and 10.
        (515, &[425, 425], &[6, 10], 9),
        (515, &[425], &[1], 2),
        // skilled Tenzan
        (318, &[374], &[0], 3),
        (185, &[374], &[0], 2),
        (555, &[374], &[0], 3),
        (108, &[374], &[0], 0),
        (296, &[374], &[0], 1),
        (508, &[374], &[0], 1),
        // 三式指揮連絡機改: 3/8 for 山汐丸, 3/7 for あきつ丸.
        (900, &[449], &[7], 4),
        (900, &[449], &[8], 5),
        (900, &[449, 449], &[3, 8], 9),
        (161, &[449], &[7], 5),
        // 一式戦 隼II型改(20戦隊): remodel bonus, then +1 per copy at 6.
        (900, &[489], &[0], 1),
        (717, &[489], &[0], 2),
        (717, &[489], &[6], 3),
        (161, &[489], &[6], 2),
        (9999, &[489], &[6], 1),
        // helicopter and autogyro synergies with TBM-3W+3S
        (646, &[326], &[0], 5),
        (646, &[389, 326], &[0, 0], 13),
        (646, &[389, 326, 69], &[0, 0, 0], 21),
        // 夕張改二丁: rocket launcher 3, 四式水中聴音機 3.
        (622, &[149, 288], &[0, 0], 6),
        // オ号 variants count together; S-51J改; 瑞雲改二(六三四空) pair.
        (553, &[324, 325], &[0, 0], 4),
        (553, &[327], &[0], 4),
        (553, &[394, 395], &[0, 0], 3),
        (517, &[379, 379], &[0, 0], 2),
        (161, &[408, 409], &[0, 0], 2),
        // 零式艦戦64型(複座KMX搭載機): three independent blocks.
        (526, &[447], &[0], 1),
        (526, &[447], &[10], 3),
        (894, &[447], &[6], 4),
        (318, &[447], &[0], 2),
        // Mk.32 per copy; 対潜短魚雷 flat with a named extra.
        (562, &[472, 472], &[0, 0], 4),
        (515, &[472], &[0], 1),
        (689, &[491, 491], &[0, 0], 4),
        (515, &[491], &[0], 2),
        (145, &[491], &[0], 0),
    ];

    #[test]
    fn rule_table_cases() {
        let master = fixture::master();
        for &(unit, gears, levels, expected) in RULE_CASES {
            assert_eq!(
                score(&master, unit, gears, levels),
                expected,
                "unit {unit} with {gears:?} at {levels:?}"
            );
        }
    }

    #[test]
    fn chitose_carrier_branch_blocks_later_names_before_remodel() {
        let mut file = fixture::file();
        let suzuya = file
            .ships
            .iter_mut()
            .find(|ship| ship.id == 508)
            .expect("fixture has 鈴谷改二航");
        suzuya.ctype = 18;
        suzuya.sort_id = 18181;
        let master = MasterData::from_file(file);
        assert_eq!(score(&master, 508, &[374], &[0]), 0);
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'w> MakeWriter<'w> for CapturedLog {
        type Writer = CapturedLog;

        fn make_writer(&'w self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn evaluate_traces_each_contribution() {
        let master = fixture::master();
        let resolver = AttributeResolver::new(&master);
        let unit = profile(&resolver, 646, &[389, 69], &[0, 0]);
        let log = CapturedLog::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(log.clone())
            .finish();

        let total = tracing::subscriber::with_default(subscriber, || evaluate(&unit));

        assert_eq!(total, 12);
        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        let traced: Vec<&str> = output
            .lines()
            .filter(|line| line.contains("asw contribution"))
            .collect();
        assert_eq!(traced.len(), 3, "{output}");
        assert!(traced[2].contains("rule=61"));
        assert!(traced[2].contains("amount=6"));
    }

    #[test]
    fn table_keeps_its_authored_size() {
        assert_eq!(RULES.len(), 62);
        assert_eq!(RULES[0].label(), gear::TYPE96_FIGHTER);
    }
}
