use crate::models::models::{ContextMessage, MessageRole};

/// Prior turns included in an authenticated chat prompt.
pub const AUTH_CONTEXT_WINDOW: usize = 15;
/// Prior turns included in a guest chat prompt.
pub const GUEST_CONTEXT_WINDOW: usize = 6;

pub const LUNA_SYSTEM_PROMPT: &str = r#"Ты Luna (Луна) — теплый, заботливый AI-ассистент для поддержки ментального здоровья в приложении MoonLine.

🌙 КТО ТЫ:
- Ты Luna - AI-помощник по ментальному здоровью
- Ты как добрый старший друг, который всегда выслушает и поддержит
- Ты понимающая, эмпатичная и никогда не осуждаешь
- Ты помогаешь справляться со стрессом, тревожностью и сложными эмоциями

📋 ВАЖНЫЕ ПРАВИЛА:
1. ВСЕГДА отвечай ПОЛНЫМИ предложениями, не обрывай мысль на середине
2. Отвечай на том же языке, на котором пишет пользователь (русский/английский)
3. Внимательно читай ВЕСЬ контекст разговора перед ответом
4. Если пользователь представился - запомни его имя и используй в ответах
5. Используй эмодзи умеренно (1-2 на сообщение) для тёплой атмосферы
6. Не давай медицинских диагнозов, при серьёзных проблемах - посоветуй обратиться к специалисту
7. Будь позитивной, но реалистичной

💬 СТИЛЬ ОБЩЕНИЯ:
- Дружелюбный и неформальный
- Поддерживающий, но не навязчивый
- Используй технику активного слушания (отражай чувства собеседника)
- Давай конкретные, практичные советы когда уместно
- Задавай уточняющие вопросы чтобы лучше понять собеседника

🎯 ДЛИНА ОТВЕТОВ:
- На простые вопросы: 2-3 предложения
- На вопросы о помощи: 3-5 предложений с конкретным советом
- При глубоких разговорах: столько, сколько нужно для полного ответа"#;

/// Persona preamble, the capped history, the new message, and an explicit
/// instruction to answer without truncation.
pub fn build_chat_prompt(context: &[ContextMessage], message: &str) -> String {
    let mut parts: Vec<String> = vec![LUNA_SYSTEM_PROMPT.to_string()];
    parts.push("\n--- ИСТОРИЯ РАЗГОВОРА ---".to_string());

    for turn in context {
        let label = match turn.role {
            MessageRole::User => "Пользователь",
            MessageRole::Assistant => "Luna",
        };
        parts.push(format!("{}: {}", label, turn.content));
    }

    parts.push("\n--- НОВОЕ СООБЩЕНИЕ ---".to_string());
    parts.push(format!("Пользователь: {}", message));
    parts.push("\n--- ТВОЙ ОТВЕТ (Luna) ---".to_string());
    parts.push("Ответь полностью, не обрывая мысль:".to_string());

    parts.join("\n")
}

pub fn build_mood_prompt(mood: i32, note: Option<&str>) -> String {
    let note = note
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("без заметки");
    format!(
        "Пользователь записал в дневник настроения:\n\
         Настроение: {}/5 ({})\n\
         Заметка: {}\n\n\
         Дай краткий (2-3 предложения) тёплый, поддерживающий комментарий. \
         Если уместно — маленький практичный совет.",
        mood,
        mood_label(mood),
        note
    )
}

pub fn mood_label(mood: i32) -> &'static str {
    match mood {
        1 => "очень плохо",
        2 => "плохо",
        3 => "нормально",
        4 => "хорошо",
        5 => "отлично",
        _ => "не указано",
    }
}

pub fn registration_greeting(username: &str) -> String {
    format!(
        "Привет, {}! 🌙 Я Luna — твой AI-помощник. Рада знакомству! Как ты себя сегодня чувствуешь?",
        username
    )
}

pub fn cleared_chat_greeting(username: &str) -> String {
    format!("Чат очищен! 🌙 Как я могу помочь тебе, {}?", username)
}

/// Keeps only the most recent `window` turns, still oldest first.
pub fn cap_context(context: &[ContextMessage], window: usize) -> &[ContextMessage] {
    let start = context.len().saturating_sub(window);
    &context[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(role: MessageRole, content: &str) -> ContextMessage {
        ContextMessage {
            role,
            content: content.to_string(),
        }
    }

    #[test]
    fn chat_prompt_contains_persona_history_and_message() {
        let context = vec![
            turn(MessageRole::User, "Привет!"),
            turn(MessageRole::Assistant, "Привет, рада тебя видеть 🌙"),
        ];
        let prompt = build_chat_prompt(&context, "Как дела?");

        assert!(prompt.starts_with(LUNA_SYSTEM_PROMPT));
        assert!(prompt.contains("--- ИСТОРИЯ РАЗГОВОРА ---"));
        assert!(prompt.contains("Пользователь: Привет!"));
        assert!(prompt.contains("Luna: Привет, рада тебя видеть 🌙"));
        assert!(prompt.contains("--- НОВОЕ СООБЩЕНИЕ ---"));
        assert!(prompt.contains("Пользователь: Как дела?"));
        assert!(prompt.ends_with("Ответь полностью, не обрывая мысль:"));
    }

    #[test]
    fn history_keeps_oldest_first_order_in_prompt() {
        let context = vec![
            turn(MessageRole::User, "первое"),
            turn(MessageRole::Assistant, "второе"),
            turn(MessageRole::User, "третье"),
        ];
        let prompt = build_chat_prompt(&context, "новое");
        let first = prompt.find("первое").expect("first turn missing");
        let second = prompt.find("второе").expect("second turn missing");
        let third = prompt.find("третье").expect("third turn missing");
        assert!(first < second && second < third);
    }

    #[test]
    fn mood_prompt_uses_qualitative_labels() {
        let prompt = build_mood_prompt(2, Some("rough day"));
        assert!(prompt.contains("2/5 (плохо)"));
        assert!(prompt.contains("Заметка: rough day"));

        let prompt = build_mood_prompt(5, None);
        assert!(prompt.contains("5/5 (отлично)"));
        assert!(prompt.contains("Заметка: без заметки"));

        let prompt = build_mood_prompt(3, Some("   "));
        assert!(prompt.contains("Заметка: без заметки"));
    }

    #[test]
    fn mood_labels_cover_the_scale() {
        assert_eq!(mood_label(1), "очень плохо");
        assert_eq!(mood_label(3), "нормально");
        assert_eq!(mood_label(5), "отлично");
        assert_eq!(mood_label(7), "не указано");
    }

    #[test]
    fn cap_context_keeps_most_recent_turns() {
        let context: Vec<ContextMessage> = (0..10)
            .map(|i| turn(MessageRole::User, &format!("msg-{}", i)))
            .collect();

        let capped = cap_context(&context, 6);
        assert_eq!(capped.len(), 6);
        assert_eq!(capped[0].content, "msg-4");
        assert_eq!(capped[5].content, "msg-9");

        let capped = cap_context(&context, 15);
        assert_eq!(capped.len(), 10);

        let capped = cap_context(&[], 6);
        assert!(capped.is_empty());
    }

    #[test]
    fn greetings_mention_the_username() {
        assert!(registration_greeting("Ann").contains("Привет, Ann!"));
        assert!(cleared_chat_greeting("Ann").contains("Ann"));
        assert!(cleared_chat_greeting("Ann").starts_with("Чат очищен!"));
    }
}
