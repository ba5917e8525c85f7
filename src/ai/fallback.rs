//! Deterministic replies for when no remote generation is possible.
//!
//! An ordered rule table, checked top to bottom against the lower-cased
//! message; the first rule with any keyword substring wins. Keywords are
//! bilingual because Luna mirrors the user's language.

struct FallbackRule {
    keywords: &'static [&'static str],
    reply: &'static str,
}

static FALLBACK_RULES: [FallbackRule; 13] = [
    // greeting
    FallbackRule {
        keywords: &[
            "привет",
            "здравствуй",
            "добрый день",
            "добрый вечер",
            "доброе утро",
            "hello",
            "hey",
            "good morning",
            "good evening",
        ],
        reply: "Привет! 🌙 Рада тебя видеть. Как ты себя сегодня чувствуешь?",
    },
    // self-introduction
    FallbackRule {
        keywords: &["меня зовут", "зовут меня", "my name is", "i'm called"],
        reply: "Очень приятно познакомиться! 🌙 Я Luna, твой помощник и собеседник. \
                Расскажи, как проходит твой день?",
    },
    // negative mood
    FallbackRule {
        keywords: &[
            "плохо",
            "грустн",
            "тоск",
            "печал",
            "плачу",
            "sad",
            "feeling down",
            "unhappy",
            "awful",
            "terrible",
        ],
        reply: "Мне жаль, что тебе сейчас непросто 💙 Такие чувства приходят и уходят, \
                и это нормально. Хочешь рассказать, что случилось?",
    },
    // anxiety
    FallbackRule {
        keywords: &[
            "тревог",
            "тревож",
            "волнуюсь",
            "беспоко",
            "паник",
            "страшно",
            "боюсь",
            "anxious",
            "anxiety",
            "worried",
            "panic",
            "nervous",
        ],
        reply: "Тревога — это тяжело, я понимаю 🌙 Попробуй сделать несколько медленных \
                глубоких вдохов: вдох на 4 счёта, выдох на 6. Что именно тебя сейчас беспокоит?",
    },
    // stress
    FallbackRule {
        keywords: &[
            "стресс",
            "устал",
            "выгор",
            "напряж",
            "вымотан",
            "stress",
            "tired",
            "burnout",
            "exhausted",
            "overwhelmed",
        ],
        reply: "Похоже, ты очень вымотан 💙 Усталость — сигнал, что пора сделать паузу. \
                Найди сегодня хотя бы 15 минут только для себя, без дел и без экрана.",
    },
    // positive mood
    FallbackRule {
        keywords: &[
            "хорошо",
            "отлично",
            "рад",
            "счастлив",
            "классно",
            "здорово",
            "прекрасно",
            "great",
            "happy",
            "wonderful",
            "amazing",
        ],
        reply: "Как здорово это слышать! ✨ Я очень рада за тебя. Что сделало этот день таким хорошим?",
    },
    // gratitude
    FallbackRule {
        keywords: &["спасибо", "благодар", "thank"],
        reply: "Всегда пожалуйста! 🌙 Я рядом, когда нужно. Обращайся в любое время.",
    },
    // identity question
    FallbackRule {
        keywords: &["кто ты", "ты кто", "что ты умеешь", "who are you", "what are you"],
        reply: "Я Luna — твой AI-компаньон в MoonLine 🌙 Помогаю следить за настроением, \
                выслушиваю и поддерживаю. Можешь рассказывать мне о чём угодно.",
    },
    // sleep difficulty
    FallbackRule {
        keywords: &[
            "уснуть",
            "бессонниц",
            "не сплю",
            "выспат",
            "insomnia",
            "can't sleep",
            "cant sleep",
            "sleep",
        ],
        reply: "Проблемы со сном изматывают 🌙 Попробуй за час до сна отложить телефон и \
                приглушить свет. Тёплый душ и спокойное дыхание тоже помогают. Давно это у тебя?",
    },
    // loneliness
    FallbackRule {
        keywords: &[
            "одинок",
            "одиноч",
            "никому не нужен",
            "никто не понимает",
            "lonely",
            "alone",
        ],
        reply: "Чувство одиночества — одно из самых тяжёлых 💙 Но знай: ты не один, я здесь \
                и всегда готова выслушать. Есть кто-то, с кем ты давно не общался, но хотел бы?",
    },
    // work/study pressure
    FallbackRule {
        keywords: &[
            "работ",
            "учёб",
            "учеб",
            "экзамен",
            "дедлайн",
            "сесси",
            "начальник",
            "study",
            "exam",
            "deadline",
            "boss",
        ],
        reply: "Нагрузка на работе и учёбе бывает непосильной 💙 Попробуй разбить большие \
                задачи на маленькие шаги и делать их по одному. Что из этого давит сильнее всего?",
    },
    // low motivation
    FallbackRule {
        keywords: &[
            "нет сил",
            "нет мотивации",
            "ничего не хочу",
            "ничего не хочется",
            "лень",
            "апат",
            "no motivation",
            "unmotivated",
            "no energy",
        ],
        reply: "Когда нет сил и мотивации, это часто знак перегрузки 💙 Начни с чего-то \
                совсем маленького — стакан воды, пара минут у окна. Маленькие шаги возвращают энергию.",
    },
    // help request
    FallbackRule {
        keywords: &[
            "помоги",
            "помощь",
            "помочь",
            "что делать",
            "посоветуй",
            "help",
            "advice",
            "what should i do",
        ],
        reply: "Конечно, я помогу 🌙 Расскажи подробнее, что происходит, и мы вместе \
                подумаем, что можно сделать.",
    },
];

const GENERIC_REPLY: &str = "Я тебя слушаю 🌙 Расскажи подробнее, что ты чувствуешь и что \
                             сейчас происходит — я здесь, чтобы поддержать тебя.";

/// Canned diary insight for when no remote generation is possible. Keyed on
/// the mood value alone; the note is only useful to a real model.
pub fn mood_fallback_insight(mood: i32) -> &'static str {
    match mood {
        1 => "Мне жаль, что день выдался таким тяжёлым 💙 Ты молодец, что записал это — \
              уже маленький шаг заботы о себе. Постарайся сегодня отдохнуть.",
        2 => "Непростой день, я понимаю 💙 Такие дни случаются у всех, и они проходят. \
              Сделай для себя сегодня что-то маленькое и приятное.",
        3 => "Ровный день — это тоже хорошо 🌙 Спасибо, что отметил своё настроение. \
              Может, вечером найдётся время на что-то, что тебя радует?",
        4 => "Рада, что день прошёл хорошо! ✨ Запомни, что помогло тебе сегодня — \
              пригодится в дни потяжелее.",
        5 => "Отличный день — как здорово! ✨ Наслаждайся этим чувством и сохрани его \
              в памяти. Ты это заслужил.",
        _ => "Спасибо, что ведёшь дневник настроения 🌙 Каждая запись помогает лучше \
              понимать себя.",
    }
}

/// Total and deterministic: always a non-empty canned reply.
pub fn fallback_reply(message: &str) -> &'static str {
    let lowered = message.to_lowercase();
    for rule in &FALLBACK_RULES {
        if rule.keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return rule.reply;
        }
    }
    GENERIC_REPLY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_is_deterministic() {
        let first = fallback_reply("привет");
        let second = fallback_reply("привет");
        assert_eq!(first, second);
        assert!(first.starts_with("Привет!"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(fallback_reply("ПРИВЕТ"), fallback_reply("привет"));
        assert_eq!(fallback_reply("Hello there"), fallback_reply("привет"));
    }

    #[test]
    fn anxiety_keywords_hit_the_anxiety_rule() {
        let reply = fallback_reply("I feel anxious");
        assert!(reply.contains("Тревога"));
        assert_eq!(fallback_reply("меня мучает тревога"), reply);
    }

    #[test]
    fn unmatched_input_gets_the_generic_reply() {
        let reply = fallback_reply("xyzzyunmatched");
        assert_eq!(reply, GENERIC_REPLY);
        assert_eq!(fallback_reply(""), GENERIC_REPLY);
    }

    #[test]
    fn first_matching_rule_wins() {
        // "плохо" (negative) appears before "хорошо" (positive) in the table
        let reply = fallback_reply("мне плохо, хотя вчера было хорошо");
        assert!(reply.contains("Мне жаль"));
    }

    #[test]
    fn every_rule_is_reachable() {
        let probes = [
            "привет",
            "меня зовут Аня",
            "мне так грустно",
            "сильная тревога",
            "какой стресс",
            "всё отлично",
            "спасибо тебе",
            "кто ты такая?",
            "не могу уснуть",
            "мне одиноко",
            "завтра экзамен",
            "нет сил совсем",
            "помоги мне",
        ];
        let mut seen = Vec::new();
        for probe in probes {
            let reply = fallback_reply(probe);
            assert!(!reply.is_empty());
            assert_ne!(reply, GENERIC_REPLY, "probe {:?} fell through", probe);
            seen.push(reply);
        }
        // all thirteen categories answered with thirteen distinct texts
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), FALLBACK_RULES.len());
    }

    #[test]
    fn mood_insight_covers_every_value() {
        let mut seen = Vec::new();
        for mood in 1..=5 {
            let insight = mood_fallback_insight(mood);
            assert!(!insight.is_empty());
            seen.push(insight);
        }
        seen.dedup();
        assert_eq!(seen.len(), 5);
        assert!(!mood_fallback_insight(0).is_empty());
    }

    #[test]
    fn never_returns_empty_text() {
        for message in ["", "   ", "1234567890", "🌙", "ok"] {
            assert!(!fallback_reply(message).is_empty());
        }
    }
}
