//! Round scoring for one finished grid.
//!
//! `total = validated numbers + symbols + color zone`, where the color zone
//! is the largest orthogonally connected same-color region (size >= 2) after
//! every face-up wildcard has been resolved to a concrete color.
//!
//! Scoring is a pure function of `(grid, round_index)`.

use serde::{Deserialize, Serialize};

use crate::domain::cards_types::Color;
use crate::domain::grid::{neighbors, PlayerGrid, GRID_SIZE};

/// Smallest region that counts as a zone.
pub const MIN_ZONE_SIZE: usize = 2;

/// Resolved color per slot; `None` for empty, face-down and unresolved cells.
pub type ColorMap = [Option<Color>; GRID_SIZE];

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorZone {
    pub color: Color,
    pub slots: Vec<usize>,
}

impl ColorZone {
    pub fn size(&self) -> usize {
        self.slots.len()
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedWildcard {
    pub slot: usize,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub validated_values: Vec<u8>,
    pub spirals: i32,
    pub crosses: i32,
    pub special_bonus: i32,
    pub wildcards: Vec<ResolvedWildcard>,
    pub zone: Option<ColorZone>,
    pub zone_multiplier: i32,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundScore {
    pub total: i32,
    pub validated_numbers: i32,
    pub symbols: i32,
    pub color_zone: i32,
    pub breakdown: ScoreBreakdown,
}

/// Zone multiplier for a 0-based round index: 2, 3, 4.
pub fn zone_multiplier(round_index: u8) -> i32 {
    i32::from(round_index) + 2
}

pub fn score_grid(grid: &PlayerGrid, round_index: u8) -> RoundScore {
    let validated_values: Vec<u8> = grid
        .face_up_cells()
        .filter(|(_, cell)| cell.validated)
        .map(|(_, cell)| cell.card.value)
        .collect();
    let validated_numbers: i32 = validated_values.iter().map(|&v| i32::from(v)).sum();

    let spirals: i32 = grid
        .face_up_cells()
        .map(|(_, cell)| i32::from(cell.card.spirals()))
        .sum();
    let crosses: i32 = grid
        .face_up_cells()
        .map(|(_, cell)| i32::from(cell.card.crosses()))
        .sum();
    let special_bonus = special_bonus(grid);
    let symbols = spirals - crosses + special_bonus;

    let colors = resolve_wildcards(grid);
    let wildcards = grid
        .face_up_cells()
        .filter(|(_, cell)| cell.card.color.is_multi())
        .map(|(slot, _)| ResolvedWildcard {
            slot,
            color: colors[slot],
        })
        .collect();

    let multiplier = zone_multiplier(round_index);
    let zone = largest_zone(&colors);
    let color_zone = zone
        .as_ref()
        .map_or(0, |z| z.size() as i32 * multiplier);

    RoundScore {
        total: validated_numbers + symbols + color_zone,
        validated_numbers,
        symbols,
        color_zone,
        breakdown: ScoreBreakdown {
            validated_values,
            spirals,
            crosses,
            special_bonus,
            wildcards,
            zone,
            zone_multiplier: multiplier,
        },
    }
}

/// Each face-up special card earns one point per other face-up card sharing
/// its color. Wildcards match every color on either side.
pub fn special_bonus(grid: &PlayerGrid) -> i32 {
    grid.face_up_cells()
        .filter(|(_, cell)| cell.card.special)
        .map(|(slot, special)| {
            grid.face_up_cells()
                .filter(|(other, cell)| {
                    *other != slot && special.card.color.matches(cell.card.color)
                })
                .count() as i32
        })
        .sum()
}

/// Concrete color for every face-up card.
///
/// A wildcard takes the color most common among its face-up, non-wildcard
/// orthogonal neighbors; ties go to the lexicographically smaller color name.
/// A wildcard with no colored neighbor stays unresolved.
pub fn resolve_wildcards(grid: &PlayerGrid) -> ColorMap {
    let mut colors: ColorMap = [None; GRID_SIZE];
    for (slot, cell) in grid.face_up_cells() {
        colors[slot] = if cell.card.color.is_multi() {
            dominant_neighbor_color(grid, slot)
        } else {
            Some(cell.card.color)
        };
    }
    colors
}

fn dominant_neighbor_color(grid: &PlayerGrid, slot: usize) -> Option<Color> {
    let mut counts = [0usize; 4];
    for n in neighbors(slot) {
        let Some(cell) = grid.get(n).filter(|c| c.face_up) else {
            continue;
        };
        if let Some(i) = Color::CONCRETE.iter().position(|&c| c == cell.card.color) {
            counts[i] += 1;
        }
    }

    let mut best: Option<(Color, usize)> = None;
    for (color, &count) in Color::CONCRETE.iter().zip(counts.iter()) {
        if count > 0 && best.map_or(true, |(_, b)| count > b) {
            best = Some((*color, count));
        }
    }
    best.map(|(color, _)| color)
}

/// Largest connected same-color region of at least `MIN_ZONE_SIZE` cells.
/// Ties keep the region found first in row-major order.
pub fn largest_zone(colors: &ColorMap) -> Option<ColorZone> {
    let mut visited = [false; GRID_SIZE];
    let mut best: Option<ColorZone> = None;

    for start in 0..GRID_SIZE {
        let Some(color) = colors[start] else {
            continue;
        };
        if visited[start] {
            continue;
        }
        let slots = flood_fill(colors, start, color, &mut visited);
        if slots.len() >= MIN_ZONE_SIZE && best.as_ref().map_or(true, |b| slots.len() > b.size()) {
            best = Some(ColorZone { color, slots });
        }
    }
    best
}

fn flood_fill(
    colors: &ColorMap,
    start: usize,
    color: Color,
    visited: &mut [bool; GRID_SIZE],
) -> Vec<usize> {
    let mut region = Vec::new();
    let mut stack = vec![start];
    visited[start] = true;

    while let Some(slot) = stack.pop() {
        region.push(slot);
        for n in neighbors(slot) {
            if !visited[n] && colors[n] == Some(color) {
                visited[n] = true;
                stack.push(n);
            }
        }
    }
    region.sort_unstable();
    region
}
