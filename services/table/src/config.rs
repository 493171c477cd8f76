use std::net::{IpAddr, SocketAddr};

use anyhow::Context;
use clap::{ArgAction, Parser};
use uno_duel_types::rules::{DEFAULT_DECLARATION_PENALTY, DEFAULT_HAND_SIZE, DEFAULT_TARGET_SCORE};
use uno_duel_types::HouseRules;

#[derive(Parser, Debug, Clone)]
#[command(name = "uno-duel-table")]
#[command(about = "Hosts two-player uno-duel rooms over WebSocket")]
pub struct Args {
    /// Interface to bind.
    #[arg(long, env = "UNO_TABLE_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    #[arg(short, long, env = "UNO_TABLE_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Seed for every room's shuffles and starting players (entropy when omitted).
    #[arg(long, env = "UNO_TABLE_SEED")]
    pub seed: Option<u64>,

    #[arg(long, env = "UNO_TARGET_SCORE", default_value_t = DEFAULT_TARGET_SCORE)]
    pub target_score: u32,

    #[arg(long, env = "UNO_HAND_SIZE", default_value_t = DEFAULT_HAND_SIZE)]
    pub hand_size: usize,

    #[arg(long, env = "UNO_STACKING", default_value_t = true, action = ArgAction::Set)]
    pub stacking: bool,

    #[arg(long, env = "UNO_MUST_PLAY_IF_ABLE", default_value_t = true, action = ArgAction::Set)]
    pub must_play_if_able: bool,

    #[arg(long, env = "UNO_DRAW_TO_MATCH", default_value_t = true, action = ArgAction::Set)]
    pub draw_to_match: bool,

    #[arg(long, env = "UNO_CHALLENGE", default_value_t = true, action = ArgAction::Set)]
    pub challenge: bool,

    /// Cards drawn by a player caught holding one undeclared card.
    #[arg(long, env = "UNO_DECLARATION_PENALTY", default_value_t = DEFAULT_DECLARATION_PENALTY)]
    pub declaration_penalty: u32,

    #[arg(long, env = "UNO_LOG_LEVEL", default_value = "info")]
    pub log_level: tracing::Level,
}

impl Args {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn house_rules(&self) -> anyhow::Result<HouseRules> {
        let rules = HouseRules {
            target_score: self.target_score,
            hand_size: self.hand_size,
            stacking: self.stacking,
            must_play_if_able: self.must_play_if_able,
            draw_to_match: self.draw_to_match,
            challenge: self.challenge,
            declaration_penalty: self.declaration_penalty,
        };
        rules.validate().context("invalid house rules")?;
        Ok(rules)
    }
}
