use crate::model::config::macros;
use shared::model::{ChatBotConfigDto, ChatConfigDto};

#[derive(Debug, Clone)]
pub struct ChatBotConfig {
    pub command: String,
    pub nickname: String,
    pub reply: String,
}

macros::from_impl!(ChatBotConfig);
impl From<&ChatBotConfigDto> for ChatBotConfig {
    fn from(dto: &ChatBotConfigDto) -> Self {
        Self {
            command: dto.command.trim().to_string(),
            nickname: dto.nickname.clone(),
            reply: dto.reply.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub room: String,
    pub movie_command: String,
    pub bot: Option<ChatBotConfig>,
}

macros::from_impl!(ChatConfig);
impl From<&ChatConfigDto> for ChatConfig {
    fn from(dto: &ChatConfigDto) -> Self {
        Self {
            room: dto.room.clone(),
            movie_command: dto.movie_command.trim().to_string(),
            bot: dto.bot.as_ref().map(ChatBotConfig::from),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::from(ChatConfigDto::default())
    }
}
