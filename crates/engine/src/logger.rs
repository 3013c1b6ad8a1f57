use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{RulesError, RulesResult};
use crate::moves::GameMove;
use crate::position::PinsAndChecks;
use crate::types::{Color, GameStatus};

/// Plain-text game log kept in memory and optionally written to disk
#[derive(Debug)]
pub struct ChessLogger {
    pub log_buffer: String,
    pub advanced_logging: bool,
    ply_count: u32,
    indent_level: usize,
}

impl ChessLogger {
    pub fn new() -> Self {
        let mut logger = Self {
            log_buffer: String::with_capacity(64 * 1024),
            advanced_logging: false,
            ply_count: 0,
            indent_level: 0,
        };

        logger.log("=== Chess Rules Game Log Started ===");
        logger.log(&format!("Date: {}", chrono::Local::now().format("%m/%d/%Y %H:%M:%S")));
        logger
    }

    pub fn should_log_advanced(&self) -> bool {
        self.advanced_logging
    }

    pub fn enable_advanced_logging(&mut self) {
        self.advanced_logging = true;
        self.log("Advanced logging enabled - pins, checks and move counts");
    }

    pub fn disable_advanced_logging(&mut self) {
        self.advanced_logging = false;
        self.log("Advanced logging disabled - basic mode active");
    }

    pub fn log(&mut self, message: &str) {
        self.log_buffer.push_str(message);
        self.log_buffer.push('\n');
    }

    pub fn log_with_indent(&mut self, message: &str) {
        let indent = "  ".repeat(self.indent_level);
        self.log_buffer.push_str(&format!("{}{}\n", indent, message));
    }

    pub fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    pub fn ply_count(&self) -> u32 {
        self.ply_count
    }

    pub fn log_move(&mut self, record: &GameMove) {
        self.ply_count += 1;
        let capture = if record.mv.is_en_passant {
            " (en passant)"
        } else if record.mv.is_capture() {
            " (capture)"
        } else {
            ""
        };
        self.log(&format!(
            "{}. {} {}{}",
            self.ply_count,
            record.mv.piece_moved.code(),
            record.describe(),
            capture
        ));
    }

    pub fn log_undo(&mut self, record: &GameMove) {
        self.ply_count = self.ply_count.saturating_sub(1);
        self.log(&format!("UNDO: {}", record.describe()));
    }

    pub fn log_status(&mut self, status: GameStatus) {
        match status {
            GameStatus::InProgress => {}
            GameStatus::Check(color) => self.log(&format!("+ {} is in check", color.name())),
            GameStatus::Checkmate(color) => self.log(&format!(
                "# Checkmate - {} wins",
                color.opponent().name()
            )),
            GameStatus::Stalemate => self.log("= Stalemate"),
        }
    }

    /// Advanced mode only: the move count and pin/check geometry for a ply
    pub fn log_analysis(&mut self, side: Color, legal_moves: usize, pins_and_checks: &PinsAndChecks) {
        if !self.should_log_advanced() {
            return;
        }
        self.increase_indent();
        self.log_with_indent(&format!("{} to move: {} legal moves", side.name(), legal_moves));
        self.increase_indent();
        for check in &pins_and_checks.checks {
            self.log_with_indent(&format!("check from {}", check.square));
        }
        for pin in &pins_and_checks.pins {
            self.log_with_indent(&format!(
                "pinned: {} along ({}, {})",
                pin.square, pin.direction.0, pin.direction.1
            ));
        }
        self.decrease_indent();
        self.decrease_indent();
    }

    /// Writes the buffer to `<dir>/<timestamp>.txt` and returns the path
    pub fn save_to_file(&mut self, dir: &Path, reason: &str) -> RulesResult<PathBuf> {
        fs::create_dir_all(dir).map_err(|e| RulesError::LogIo {
            message: format!("Failed to create log directory: {}", e),
        })?;

        let now = chrono::Local::now();
        let filename = dir.join(format!("{}.txt", now.format("%m_%d_%Y_%H_%M_%S")));

        self.log(&format!("Game ended: {} - Saving log", reason));

        let mut file = File::create(&filename).map_err(|e| RulesError::LogIo {
            message: format!("Failed to create log file: {}", e),
        })?;
        file.write_all(self.log_buffer.as_bytes()).map_err(|e| RulesError::LogIo {
            message: format!("Failed to write log file: {}", e),
        })?;

        log::info!("game log saved to {}", filename.display());
        Ok(filename)
    }
}

impl Default for ChessLogger {
    fn default() -> Self {
        Self::new()
    }
}
