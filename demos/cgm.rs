//! Translates `usecase/cgm/cgm_runtime.py`'s graph wiring: a glucose PWL
//! source feeds running time-above-range/time-below-range means plus a
//! running mean glucose, filtered by the above/below-range indicators.
//! Reads a 2-column CSV (`time,glucose`, header row skipped) and prints
//! each observed series.

use pwsignal::dataflow::{BinaryNode, Filter, HigherThan, LowerThan, MultConst, PwlSourceNode, UnaryNode, WindowNode};
use pwsignal::graph::Signal;
use pwsignal::window_ops::Integral;
use std::cell::RefCell;
use std::env;
use std::fs;
use std::rc::Rc;

const ABOVE_RANGE: f64 = 180.0;
const BELOW_RANGE: f64 = 70.0;
const WINDOW_MINUTES: f64 = 180.0;

fn parse_row(line: &str) -> Option<(f64, f64)> {
    let mut fields = line.split(',');
    let time: f64 = fields.next()?.trim().parse().ok()?;
    let glucose: f64 = fields.next()?.trim().parse().ok()?;
    Some((time, glucose))
}

fn print_series(label: &str, signal: &Rc<RefCell<Signal>>) {
    let (t, v) = signal.borrow().get_points();
    for (time, value) in t.iter().zip(v.iter()) {
        println!("{label},{time},{value}");
    }
}

fn main() {
    pwsignal::logger::spawn(log::LevelFilter::Info, "cgm").expect("logger spawns once");
    log::info!("wiring cgm graph at {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));

    let path = env::args().nth(1).unwrap_or_else(|| "demos/data/cgm.csv".to_string());
    let contents = fs::read_to_string(&path).unwrap_or_else(|e| panic!("could not read {path}: {e}"));

    let mut glucose = PwlSourceNode::new();
    let phi_ar = Rc::new(RefCell::new(UnaryNode::new(HigherThan(ABOVE_RANGE))));
    let phi_br = Rc::new(RefCell::new(UnaryNode::new(LowerThan(BELOW_RANGE))));

    let int_tar = Rc::new(RefCell::new(WindowNode::new(WINDOW_MINUTES, Integral::new())));
    let int_tbr = Rc::new(RefCell::new(WindowNode::new(WINDOW_MINUTES, Integral::new())));
    let mut phi_tar = UnaryNode::new(MultConst(1.0 / WINDOW_MINUTES));
    let mut phi_tbr = UnaryNode::new(MultConst(1.0 / WINDOW_MINUTES));
    let mean_tar_signal = phi_tar.observe();
    let mean_tbr_signal = phi_tbr.observe();

    let int_g = Rc::new(RefCell::new(WindowNode::new(WINDOW_MINUTES, Integral::new())));
    let mut mean_g = UnaryNode::new(MultConst(1.0 / WINDOW_MINUTES));
    let mean_g_signal = mean_g.observe();

    let filter_g_ar = Rc::new(RefCell::new(BinaryNode::new(Filter)));
    let int_g_filtered_ar = Rc::new(RefCell::new(WindowNode::new(WINDOW_MINUTES, Integral::new())));
    let mut mean_g_filtered_ar = UnaryNode::new(MultConst(1.0 / WINDOW_MINUTES));
    let mean_g_filtered_ar_signal = mean_g_filtered_ar.observe();

    let filter_g_br = Rc::new(RefCell::new(BinaryNode::new(Filter)));
    let int_g_filtered_br = Rc::new(RefCell::new(WindowNode::new(WINDOW_MINUTES, Integral::new())));
    let mut mean_g_filtered_br = UnaryNode::new(MultConst(1.0 / WINDOW_MINUTES));
    let mean_g_filtered_br_signal = mean_g_filtered_br.observe();

    {
        let int_tar = int_tar.clone();
        phi_ar.borrow_mut().to(move |interval| int_tar.borrow_mut().receive(interval));
    }
    int_tar.borrow_mut().to(move |interval| phi_tar.receive(interval));

    {
        let int_tbr = int_tbr.clone();
        phi_br.borrow_mut().to(move |interval| int_tbr.borrow_mut().receive(interval));
    }
    int_tbr.borrow_mut().to(move |interval| phi_tbr.receive(interval));

    int_g.borrow_mut().to(move |interval| mean_g.receive(interval));

    {
        let int_g_filtered_ar = int_g_filtered_ar.clone();
        filter_g_ar.borrow_mut().to(move |interval| int_g_filtered_ar.borrow_mut().receive(interval));
    }
    int_g_filtered_ar.borrow_mut().to(move |interval| mean_g_filtered_ar.receive(interval));

    {
        let int_g_filtered_br = int_g_filtered_br.clone();
        filter_g_br.borrow_mut().to(move |interval| int_g_filtered_br.borrow_mut().receive(interval));
    }
    int_g_filtered_br.borrow_mut().to(move |interval| mean_g_filtered_br.receive(interval));

    {
        let phi_ar = phi_ar.clone();
        glucose.to(move |interval| phi_ar.borrow_mut().receive(interval));
    }
    {
        let phi_br = phi_br.clone();
        glucose.to(move |interval| phi_br.borrow_mut().receive(interval));
    }
    {
        let int_g = int_g.clone();
        glucose.to(move |interval| int_g.borrow_mut().receive(interval));
    }
    {
        let filter_g_ar = filter_g_ar.clone();
        glucose.to(move |interval| filter_g_ar.borrow_mut().receive_left(interval));
    }
    {
        let filter_g_ar = filter_g_ar.clone();
        phi_ar.borrow_mut().to(move |interval| filter_g_ar.borrow_mut().receive_right(interval));
    }
    {
        let filter_g_br = filter_g_br.clone();
        glucose.to(move |interval| filter_g_br.borrow_mut().receive_left(interval));
    }
    {
        let filter_g_br = filter_g_br.clone();
        phi_br.borrow_mut().to(move |interval| filter_g_br.borrow_mut().receive_right(interval));
    }

    let glucose_signal = glucose.observe();

    for line in contents.lines().skip(1) {
        if let Some((time, value)) = parse_row(line) {
            glucose.receive(time, value);
        }
    }

    print_series("glucose", &glucose_signal);
    print_series("mean_glucose", &mean_g_signal);
    print_series("mean_glucose_filtered_above_range", &mean_g_filtered_ar_signal);
    print_series("mean_glucose_filtered_below_range", &mean_g_filtered_br_signal);
    print_series("mean_time_above_range", &mean_tar_signal);
    print_series("mean_time_below_range", &mean_tbr_signal);
}
