use criterion::{black_box, criterion_group, criterion_main, Criterion};

use dat2vtk::parse::read_timestep;
use dat2vtk::{FileType, LineSource, PolyData};

/// a structured grid of `n` x `n` quads, written the way the simulator does:
/// every quad lists all four of its corners
fn quad_grid(n: usize) -> String {
    let mut text = String::from("TITLE = \"bench\"\nVARIABLES = \"X\", \"Y\", \"D\"\n");

    for i in 0..n {
        for j in 0..n {
            text.push_str(&format!(
                "ZONE T=\"E{i}_{j}\" SOLUTIONTIME=1 I=1, J=4, F=FEPOINT\n"
            ));
            for (di, dj) in [(0, 0), (1, 0), (1, 1), (0, 1)] {
                let (x, y) = ((i + di) as f64, (j + dj) as f64);
                text.push_str(&format!("{x} {y} {} ", x * y));
            }
            text.push('\n');
        }
    }

    text.push_str("Load factor = 1.0 Total deformation = 1.0 Iter = 1\n");
    text
}

fn parse_and_build(text: &str) -> PolyData {
    let mut lines = LineSource::new(text.as_bytes());
    let timestep = read_timestep(&mut lines, FileType::Damage).unwrap();
    PolyData::from_timestep(&timestep).unwrap()
}

fn write(polydata: &PolyData) {
    let mut output = Vec::new();
    dat2vtk::write_vtk(&mut output, polydata, FileType::Damage).unwrap();
    black_box(output);
}

fn convert_bench(c: &mut Criterion) {
    let small = quad_grid(20);
    let large = quad_grid(100);

    c.bench_function("parse and build 20x20", |b| {
        b.iter(|| parse_and_build(black_box(&small)))
    });

    c.bench_function("parse and build 100x100", |b| {
        b.iter(|| parse_and_build(black_box(&large)))
    });

    let polydata = parse_and_build(&large);
    c.bench_function("write 100x100", |b| b.iter(|| write(black_box(&polydata))));
}

criterion_group!(benches, convert_bench);
criterion_main!(benches);
