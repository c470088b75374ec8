use crate::model::ChatConfig;
use crate::utils::{parse_movie_command, UrlClassifier};
use shared::model::{ChatMessageType, ChatServerEvent};

/// Turns one chat message into the events broadcast to the room.
///
/// The message itself is always echoed first. A movie command adds a `movie_link`
/// with the classified url, the bot command adds the canned bot answer.
pub fn handle_chat_message(classifier: &UrlClassifier, chat: &ChatConfig, nickname: &str, message: &str, timestamp: &str) -> Vec<ChatServerEvent> {
    let mut events = vec![ChatServerEvent::NewMessage {
        nickname: nickname.to_string(),
        message: message.to_string(),
        timestamp: timestamp.to_string(),
        message_type: ChatMessageType::Text,
    }];

    if let Some(url) = parse_movie_command(message, &chat.movie_command) {
        events.push(ChatServerEvent::MovieLink {
            url: classifier.classify(url).into_url(),
            sender: nickname.to_string(),
        });
    } else if let Some(bot) = chat.bot.as_ref() {
        if message.trim_start().starts_with(bot.command.as_str()) {
            events.push(ChatServerEvent::NewMessage {
                nickname: bot.nickname.clone(),
                message: bot.reply.clone(),
                timestamp: timestamp.to_string(),
                message_type: ChatMessageType::Bot,
            });
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChatBotConfig, ResolverConfig};

    fn chat_config() -> ChatConfig {
        ChatConfig {
            bot: Some(ChatBotConfig {
                command: "@bot".to_string(),
                nickname: "MovieBot".to_string(),
                reply: "Share a movie with @movie <url>".to_string(),
            }),
            ..ChatConfig::default()
        }
    }

    #[test]
    fn test_plain_message_is_echoed() {
        let classifier = UrlClassifier::new(&ResolverConfig::default());
        let events = handle_chat_message(&classifier, &chat_config(), "alice", "hello", "12:00");
        assert_eq!(events, vec![ChatServerEvent::NewMessage {
            nickname: "alice".to_string(),
            message: "hello".to_string(),
            timestamp: "12:00".to_string(),
            message_type: ChatMessageType::Text,
        }]);
    }

    #[test]
    fn test_movie_command_emits_classified_link() {
        let classifier = UrlClassifier::new(&ResolverConfig::default());
        let events = handle_chat_message(&classifier, &chat_config(), "alice", "@movie https://cdn.host/live.m3u8", "12:00");
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], ChatServerEvent::MovieLink {
            url: "https://jx.m3u8.tv/jiexi/?url=https%3A%2F%2Fcdn.host%2Flive.m3u8".to_string(),
            sender: "alice".to_string(),
        });

        let events = handle_chat_message(&classifier, &chat_config(), "bob", "@movie https://host/film.mp4", "12:01");
        assert_eq!(events[1], ChatServerEvent::MovieLink {
            url: "https://host/film.mp4".to_string(),
            sender: "bob".to_string(),
        });
    }

    #[test]
    fn test_bot_command_answers() {
        let classifier = UrlClassifier::new(&ResolverConfig::default());
        let events = handle_chat_message(&classifier, &chat_config(), "alice", "@bot help", "12:00");
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[1], ChatServerEvent::NewMessage { nickname, message_type: ChatMessageType::Bot, .. } if nickname == "MovieBot"));
    }
}
