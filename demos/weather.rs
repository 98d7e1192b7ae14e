//! Translates `usecase/weather/weather_runtime.py`'s graph wiring: two PWL
//! sources (CO2, temperature) each feed a 5-hour running mean, thresholded
//! and combined with a min (AND). Reads a 3-column CSV (`time,co2,temp`,
//! header row skipped) and prints the combined signal's point list.

use pwsignal::dataflow::{BinaryNode, HigherThan, Min, MultConst, PwlSourceNode, UnaryNode, WindowNode};
use pwsignal::window_ops::Integral;
use std::cell::RefCell;
use std::env;
use std::fs;
use std::rc::Rc;

const CO2_THRESHOLD: f64 = 422.0;
const TEMP_THRESHOLD: f64 = 0.0;
const WINDOW_HOURS: f64 = 5.0;

fn parse_row(line: &str) -> Option<(f64, f64, f64)> {
    let mut fields = line.split(',');
    let time: f64 = fields.next()?.trim().parse().ok()?;
    let co2: f64 = fields.next()?.trim().parse().ok()?;
    let temp: f64 = fields.next()?.trim().parse().ok()?;
    Some((time, co2, temp))
}

fn main() {
    pwsignal::logger::spawn(log::LevelFilter::Info, "weather").expect("logger spawns once");
    log::info!("wiring weather graph at {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));

    let path = env::args().nth(1).unwrap_or_else(|| "demos/data/weather.csv".to_string());
    let contents = fs::read_to_string(&path).unwrap_or_else(|e| panic!("could not read {path}: {e}"));

    let mut co2 = PwlSourceNode::new();
    let mut temp = PwlSourceNode::new();

    let int_co2 = Rc::new(RefCell::new(WindowNode::new(WINDOW_HOURS, Integral::new())));
    let mean_co2 = Rc::new(RefCell::new(UnaryNode::new(MultConst(1.0 / WINDOW_HOURS))));
    let mean_co2_high = Rc::new(RefCell::new(UnaryNode::new(HigherThan(CO2_THRESHOLD))));

    let int_temp = Rc::new(RefCell::new(WindowNode::new(WINDOW_HOURS, Integral::new())));
    let mean_temp = Rc::new(RefCell::new(UnaryNode::new(MultConst(1.0 / WINDOW_HOURS))));
    let mean_temp_high = Rc::new(RefCell::new(UnaryNode::new(HigherThan(TEMP_THRESHOLD))));

    let combined = Rc::new(RefCell::new(BinaryNode::new(Min)));

    {
        let mean_co2 = mean_co2.clone();
        int_co2.borrow_mut().to(move |interval| mean_co2.borrow_mut().receive(interval));
    }
    {
        let mean_co2_high = mean_co2_high.clone();
        mean_co2.borrow_mut().to(move |interval| mean_co2_high.borrow_mut().receive(interval));
    }
    {
        let combined = combined.clone();
        mean_co2_high.borrow_mut().to(move |interval| combined.borrow_mut().receive_left(interval));
    }

    {
        let mean_temp = mean_temp.clone();
        int_temp.borrow_mut().to(move |interval| mean_temp.borrow_mut().receive(interval));
    }
    {
        let mean_temp_high = mean_temp_high.clone();
        mean_temp.borrow_mut().to(move |interval| mean_temp_high.borrow_mut().receive(interval));
    }
    {
        let combined = combined.clone();
        mean_temp_high.borrow_mut().to(move |interval| combined.borrow_mut().receive_right(interval));
    }

    {
        let int_co2 = int_co2.clone();
        co2.to(move |interval| int_co2.borrow_mut().receive(interval));
    }
    {
        let int_temp = int_temp.clone();
        temp.to(move |interval| int_temp.borrow_mut().receive(interval));
    }

    let combined_signal = combined.borrow_mut().observe();

    for line in contents.lines().skip(1) {
        if let Some((time, co2_value, temp_value)) = parse_row(line) {
            co2.receive(time, co2_value);
            temp.receive(time, temp_value);
        }
    }

    let (t, v) = combined_signal.borrow().get_points();
    for (time, value) in t.iter().zip(v.iter()) {
        println!("{time},{value}");
    }
}
