//! JavaScript bindings.
//!
//! Cities cross the boundary as arrays of `{ id, x, y }` objects; results
//! and step traces come back as plain JS objects.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::constructive::nearest_neighbor;
use crate::exact::brute_force;
use crate::instance::{random_cities, CityLayout};
use crate::local_search::two_opt;
use crate::models::City;
use crate::trace::{brute_force_steps, greedy_steps, two_opt_steps};

fn cities_from(value: JsValue) -> Result<Vec<City>, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(JsValue::from)
}

fn route_from(value: JsValue) -> Result<Vec<usize>, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(JsValue::from)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

fn js_error(err: crate::error::TspError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen(js_name = computeGreedy)]
pub fn compute_greedy(cities: JsValue) -> Result<JsValue, JsValue> {
    let cities = cities_from(cities)?;
    to_js(&nearest_neighbor(&cities))
}

#[wasm_bindgen(js_name = computeTwoOpt)]
pub fn compute_two_opt(cities: JsValue, initial: JsValue) -> Result<JsValue, JsValue> {
    let cities = cities_from(cities)?;
    let initial = route_from(initial)?;
    to_js(&two_opt(&cities, &initial).map_err(js_error)?)
}

#[wasm_bindgen(js_name = computeBruteForce)]
pub fn compute_brute_force(cities: JsValue) -> Result<JsValue, JsValue> {
    let cities = cities_from(cities)?;
    to_js(&brute_force(&cities).map_err(js_error)?)
}

#[wasm_bindgen(js_name = generateStepsGreedy)]
pub fn generate_steps_greedy(cities: JsValue) -> Result<JsValue, JsValue> {
    let cities = cities_from(cities)?;
    to_js(&greedy_steps(&cities))
}

#[wasm_bindgen(js_name = generateStepsTwoOpt)]
pub fn generate_steps_two_opt(cities: JsValue, initial: JsValue) -> Result<JsValue, JsValue> {
    let cities = cities_from(cities)?;
    let initial = route_from(initial)?;
    to_js(&two_opt_steps(&cities, &initial).map_err(js_error)?)
}

/// `samplingRate` of 0 is treated as 1.
#[wasm_bindgen(js_name = generateStepsBruteForce)]
pub fn generate_steps_brute_force(cities: JsValue, sampling_rate: usize) -> Result<JsValue, JsValue> {
    let cities = cities_from(cities)?;
    to_js(&brute_force_steps(&cities, sampling_rate).map_err(js_error)?)
}

/// Random cities inside a `width` x `height` canvas.
#[wasm_bindgen(js_name = randomCities)]
pub fn random_cities_js(
    count: usize,
    width: f64,
    height: f64,
    seed: Option<u64>,
) -> Result<JsValue, JsValue> {
    let layout = CityLayout::default()
        .with_count(count)
        .with_size(width, height);
    to_js(&random_cities(&layout, seed).map_err(js_error)?)
}
