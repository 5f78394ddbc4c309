// Skill reference table, grouped by category.

/// A named group of skills, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillCategory {
    pub category: &'static str,
    pub skills: &'static [&'static str],
}

pub const SKILL_CATEGORIES: &[SkillCategory] = &[
    SkillCategory {
        category: "General",
        skills: &[
            "Block",
            "Dauntless",
            "Dirty Player",
            "Fend",
            "Frenzy",
            "Kick",
            "Pro",
            "Shadowing",
            "Strip Ball",
            "Sure Hands",
            "Tackle",
            "Wrestle",
        ],
    },
    SkillCategory {
        category: "Agility",
        skills: &[
            "Catch",
            "Diving Catch",
            "Diving Tackle",
            "Dodge",
            "Jump Up",
            "Leap",
            "Side Step",
            "Sneaky Git",
            "Sprint",
            "Sure Feet",
        ],
    },
    SkillCategory {
        category: "Passing",
        skills: &[
            "Accurate",
            "Dump-Off",
            "Hail Mary Pass",
            "Leader",
            "Nerves of Steel",
            "Pass",
            "Safe Throw",
            "Strong Arm",
        ],
    },
    SkillCategory {
        category: "Strength",
        skills: &[
            "Break Tackle",
            "Guard",
            "Juggernaut",
            "Mighty Blow",
            "Multiple Block",
            "Piling On",
            "Stand Firm",
            "Thick Skull",
        ],
    },
    SkillCategory {
        category: "Mutation",
        skills: &[
            "Big Hand",
            "Claw",
            "Disturbing Presence",
            "Extra Arms",
            "Foul Appearance",
            "Horns",
            "Prehensile Tail",
            "Tentacles",
            "Two Heads",
            "Very Long Legs",
        ],
    },
];

/// Every known skill, category by category.
pub fn all_skills() -> impl Iterator<Item = &'static str> {
    SKILL_CATEGORIES.iter().flat_map(|c| c.skills.iter().copied())
}

/// The table's spelling of `name`, matched case-insensitively.
pub fn canonical_skill(name: &str) -> Option<&'static str> {
    let name = name.trim();
    all_skills().find(|s| s.eq_ignore_ascii_case(name))
}

/// The category a skill belongs to.
pub fn category_of(skill: &str) -> Option<&'static str> {
    let skill = canonical_skill(skill)?;
    SKILL_CATEGORIES
        .iter()
        .find(|c| c.skills.contains(&skill))
        .map(|c| c.category)
}
