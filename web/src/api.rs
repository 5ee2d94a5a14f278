//! Free functions exported to the JS front end. Boards and problems travel as
//! JSON, boards as nested arrays of `"O"`/`"X"`.

use puzzle_panel_core::{Board, ProblemGenerator, RandomProblemGenerator, StageTable};
use wasm_bindgen::prelude::*;

use crate::{js_error, random_seed};

pub fn flip_panels_json(board: &str, row: i32, col: i32) -> anyhow::Result<String> {
    let board: Board = serde_json::from_str(board)?;
    let flipped = puzzle_panel_core::flip_panels(&board, row, col);
    Ok(serde_json::to_string(&flipped)?)
}

pub fn boards_equal_json(a: &str, b: &str) -> anyhow::Result<bool> {
    let a: Board = serde_json::from_str(a)?;
    let b: Board = serde_json::from_str(b)?;
    Ok(puzzle_panel_core::boards_equal(&a, &b))
}

pub fn generate_problem_json(level: u32, seed: u64) -> anyhow::Result<String> {
    let problem = RandomProblemGenerator::new(seed).generate(level)?;
    log::debug!("problem for level {level} from seed {seed}");
    Ok(serde_json::to_string(&problem)?)
}

pub fn stage_table_json() -> anyhow::Result<String> {
    let listing: Vec<_> = StageTable::default().iter().collect();
    Ok(serde_json::to_string(&listing)?)
}

#[wasm_bindgen(js_name = flipPanels)]
pub fn flip_panels(board: &str, row: i32, col: i32) -> Result<String, JsError> {
    flip_panels_json(board, row, col).map_err(js_error)
}

#[wasm_bindgen(js_name = areBoardsEqual)]
pub fn are_boards_equal(a: &str, b: &str) -> Result<bool, JsError> {
    boards_equal_json(a, b).map_err(js_error)
}

#[wasm_bindgen(js_name = getStageForLevel)]
pub fn get_stage_for_level(level: u32) -> u32 {
    puzzle_panel_core::stage_for_level(level)
}

#[wasm_bindgen(js_name = generateProblem)]
pub fn generate_problem(level: u32, seed: Option<u64>) -> Result<String, JsError> {
    generate_problem_json(level, seed.unwrap_or_else(random_seed)).map_err(js_error)
}

#[wasm_bindgen(js_name = stageTable)]
pub fn stage_table() -> Result<String, JsError> {
    stage_table_json().map_err(js_error)
}
