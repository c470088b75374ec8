use crate::utils::{default_movie_command, default_room};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ChatBotConfigDto {
    pub command: String,
    pub nickname: String,
    pub reply: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ChatConfigDto {
    #[serde(default = "default_room")]
    pub room: String,
    #[serde(default = "default_movie_command")]
    pub movie_command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot: Option<ChatBotConfigDto>,
}

impl Default for ChatConfigDto {
    fn default() -> Self {
        Self {
            room: default_room(),
            movie_command: default_movie_command(),
            bot: None,
        }
    }
}

impl ChatConfigDto {
    pub fn prepare(&mut self) {
        if self.room.trim().is_empty() {
            self.room = default_room();
        }
        if self.movie_command.trim().is_empty() {
            self.movie_command = default_movie_command();
        }
        if self.bot.as_ref().is_some_and(|b| b.command.trim().is_empty()) {
            self.bot = None;
        }
    }
}
