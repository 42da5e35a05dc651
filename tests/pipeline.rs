use std::{fs, path::Path};

use fractal_bench_analysis::{
    config::{GraphOptions, ProcessOptions, SUMMARY_CSV, WORKER_PAYLOADS_CSV, WORKER_TOTALS_CSV},
    graphs::{CLIENT_TIME_COLUMN, Table, generate_graphs},
    process_results,
    utils::export::export_all,
};

fn trial(root: &Path, rel: &str, dequeue: f64, workers: &[(u32, &str)]) {
    let dir = root.join(rel);
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("client_log.txt"),
        format!("starting\n[CONNECT]: 0.010\n[DEQUEUE_ALL]: {}\n", dequeue),
    )
    .unwrap();
    fs::write(dir.join("coordinator_log.txt"), "[DISPATCH]: 0.5\n").unwrap();
    for (id, text) in workers {
        fs::write(dir.join(format!("worker_{}.txt", id)), text).unwrap();
    }
}

#[test]
fn results_tree_to_csv() {
    let root = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();

    trial(
        root.path(),
        "mandel/n2/g16/r0",
        1.25,
        &[
            (2, "[WORKER_2_PAYLOAD]: 0.1, 16, 100\n[WORKER_2_TOTAL]: 0.1, 16, 100\n"),
            (1, "[WORKER_1_PAYLOAD]: 0.2, 16, 200\n[WORKER_1_PAYLOAD]: 0.3, 16, 300\n[WORKER_1_TOTAL]: 0.5, 32, 500\n"),
        ],
    );
    trial(root.path(), "mandel/n1/g16/r0", 2.5, &[(1, "[WORKER_1_TOTAL]: 2.0, 64, 900\n")]);
    fs::write(root.path().join("mandel/n1/notes.md"), "ignored").unwrap();

    let results = process_results(root.path(), &ProcessOptions::default()).unwrap();
    assert_eq!(results.summaries.len(), 2);
    assert_eq!(
        results.metric_columns(),
        vec!["client_connect", "client_dequeue_all", "coord_dispatch"]
    );
    assert_eq!(results.worker_payloads.len(), 3);
    assert_eq!(results.worker_totals.len(), 3);

    let report = export_all(out.path(), &results, 9).unwrap();
    assert_eq!(report.written.len(), 3);

    let summary = fs::read_to_string(out.path().join(SUMMARY_CSV)).unwrap();
    let lines: Vec<_> = summary.lines().collect();
    assert_eq!(
        lines,
        vec![
            "difficulty,num_nodes,granularity,trial_id,client_connect,client_dequeue_all,coord_dispatch",
            "mandel,1,16,0,0.010000000,2.500000000,0.500000000",
            "mandel,2,16,0,0.010000000,1.250000000,0.500000000",
        ]
    );

    let payloads = fs::read_to_string(out.path().join(WORKER_PAYLOADS_CSV)).unwrap();
    let worker_ids: Vec<_> = payloads
        .lines()
        .skip(1)
        .map(|l| l.split(',').nth(4).unwrap().to_string())
        .collect();
    assert_eq!(worker_ids, vec!["1", "1", "2"]);

    let totals = fs::read_to_string(out.path().join(WORKER_TOTALS_CSV)).unwrap();
    assert_eq!(totals.lines().nth(1), Some("mandel,1,16,0,1,2.000000000,64,900"));
}

#[test]
fn written_summary_feeds_the_graph_stage() {
    let root = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    trial(root.path(), "julia/n1/g8/r0", 4.0, &[]);
    trial(root.path(), "julia/n1/g8/r1", 2.0, &[]);
    trial(root.path(), "julia/n4/g8/r0", 1.0, &[]);

    let results = process_results(root.path(), &ProcessOptions::default()).unwrap();
    export_all(out.path(), &results, 9).unwrap();

    let table = Table::read(&out.path().join(SUMMARY_CSV)).unwrap();
    assert_eq!(table.cases().unwrap(), vec!["julia"]);
    let obs = table.observations(CLIENT_TIME_COLUMN).unwrap();
    assert_eq!(obs["julia"].len(), 3);

    let speedup = fractal_bench_analysis::graphs::series::speedups(&obs["julia"]);
    let at_four: Vec<f64> = speedup
        .iter()
        .filter(|o| o.num_nodes == 4.0)
        .map(|o| o.value)
        .collect();
    assert_eq!(at_four, vec![3.0]);
}

fn graph_options(dir: &Path, html_report: bool) -> GraphOptions {
    GraphOptions {
        graphs_dir: dir.join("graphs"),
        html_report,
    }
}

#[test]
fn exported_csvs_render_every_chart() {
    let root = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    trial(root.path(), "julia/n1/g8/r0", 4.0, &[(1, "[WORKER_1_TOTAL]: 3.5, 64, 900\n")]);
    trial(root.path(), "julia/n1/g8/r1", 3.0, &[(1, "[WORKER_1_TOTAL]: 2.5, 64, 900\n")]);
    trial(
        root.path(),
        "julia/n2/g8/r0",
        1.5,
        &[
            (1, "[WORKER_1_TOTAL]: 1.2, 32, 450\n"),
            (2, "[WORKER_2_TOTAL]: 1.3, 32, 450\n"),
        ],
    );

    let results = process_results(root.path(), &ProcessOptions::default()).unwrap();
    export_all(out.path(), &results, 9).unwrap();

    let options = graph_options(out.path(), true);
    let written = generate_graphs(
        &out.path().join(SUMMARY_CSV),
        &out.path().join(WORKER_TOTALS_CSV),
        &options,
    )
    .unwrap();

    for name in [
        "client_dequeue_all_julia.png",
        "client_speedup_julia.png",
        "parallel_efficiency_julia.png",
        "worker_compute_julia.png",
        "report_julia.html",
    ] {
        let path = options.graphs_dir.join(name);
        assert!(path.is_file(), "{} not written", name);
        assert!(written.contains(&path));
    }
    assert_eq!(written.len(), 5);
}

#[test]
fn summary_without_client_time_only_plots_workers() {
    let dir = tempfile::tempdir().unwrap();
    let summary = dir.path().join(SUMMARY_CSV);
    let totals = dir.path().join(WORKER_TOTALS_CSV);
    fs::write(
        &summary,
        "difficulty,num_nodes,granularity,trial_id,coord_dispatch\n\
         julia,1,8,0,0.5\n\
         julia,2,8,0,0.4\n",
    )
    .unwrap();
    fs::write(
        &totals,
        "difficulty,num_nodes,granularity,trial_id,worker_id,compute_time,pixel_count,iterations\n\
         julia,1,8,0,1,2.0,64,900\n\
         julia,2,8,0,1,1.1,32,450\n",
    )
    .unwrap();

    let options = graph_options(dir.path(), false);
    let written = generate_graphs(&summary, &totals, &options).unwrap();
    assert_eq!(written, vec![options.graphs_dir.join("worker_compute_julia.png")]);
    assert!(!options.graphs_dir.join("client_dequeue_all_julia.png").exists());
}

#[test]
fn case_without_worker_rows_gets_no_worker_chart() {
    let dir = tempfile::tempdir().unwrap();
    let summary = dir.path().join(SUMMARY_CSV);
    let totals = dir.path().join(WORKER_TOTALS_CSV);
    fs::write(
        &summary,
        "difficulty,num_nodes,granularity,trial_id,client_dequeue_all\n\
         julia,1,8,0,2.0\n\
         julia,2,8,0,1.0\n\
         mandel,1,8,0,4.0\n\
         mandel,2,8,0,2.5\n",
    )
    .unwrap();
    fs::write(
        &totals,
        "difficulty,num_nodes,granularity,trial_id,worker_id,compute_time,pixel_count,iterations\n\
         julia,1,8,0,1,1.8,64,900\n",
    )
    .unwrap();

    let options = graph_options(dir.path(), false);
    let written = generate_graphs(&summary, &totals, &options).unwrap();

    assert!(options.graphs_dir.join("worker_compute_julia.png").is_file());
    assert!(options.graphs_dir.join("parallel_efficiency_mandel.png").is_file());
    assert!(!options.graphs_dir.join("worker_compute_mandel.png").exists());
    assert_eq!(written.len(), 7);
}
