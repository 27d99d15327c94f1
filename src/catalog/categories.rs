// SPDX-License-Identifier: MIT
// Category assignment: ordered keyword-substring rules over the dish name.
//
// The table is static configuration — adding a category means shipping a new
// build, not migrating data.

/// Ordered category rules. Rules are tested in declaration order and the
/// first category with any keyword contained in the lowercased dish name
/// wins. The trailing catch-all has no keywords and never matches by
/// substring; it is the default for names nothing else claims.
pub const CATEGORY_RULES: &[(&str, &[&str])] = &[
    (
        "Десерты",
        &[
            "десерт", "пирог", "торт", "кекс", "вафля", "блинчик", "сырник", "чизкейк",
            "медовик", "синнабон", "крафл", "орео", "варенье", "эклер",
        ],
    ),
    (
        "Закуски",
        &["закуск", "оливк", "маслин", "артишок", "карпаччо", "брускетт"],
    ),
    (
        "Мясные блюда",
        &[
            "мясн", "перепелк", "утк", "котлет", "шатобриан", "брискет", "бургер", "бекон",
            "окорок", "омлет", "яйц", "ребр",
        ],
    ),
    (
        "Рыба и морепродукты",
        &[
            "рыб", "лосос", "тунец", "угор", "креветк", "гребешок", "краб", "икра", "ролл",
            "суши", "голубец", "треск", "щук", "темпура", "нори",
        ],
    ),
    ("Салаты", &["салат", "руккола", "боул", "коул", "stefan"]),
    ("Супы", &["суп", "бульон", "том-ям", "вонтон"]),
    (
        "Суши и роллы",
        &["ролл", "суши", "калифорни", "филадельфи", "радуга"],
    ),
    (
        "Завтраки",
        &[
            "завтрак", "вафля", "бриошь", "драник", "скрэмбл", "птитим", "киноа", "овсян",
            "сырник",
        ],
    ),
    ("Прочее", &[]),
];

/// The catch-all category, assigned when no keyword matches.
pub const FALLBACK_CATEGORY: &str = "Прочее";

/// Pick the category for a dish name. Deterministic: same name, same table,
/// same answer.
pub fn detect_category(dish_name: &str) -> &'static str {
    let lower = dish_name.to_lowercase();
    for &(category, keywords) in CATEGORY_RULES {
        if keywords.iter().any(|keyword| lower.contains(keyword)) {
            return category;
        }
    }
    FALLBACK_CATEGORY
}
