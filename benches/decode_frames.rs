use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use mraw_reader_rs::image_pipeline::{
    BitOrder, MemorySource, MetadataEncoding, MrawReader, ReaderConfig,
};

const FRAMES: usize = 4;

fn metadata(width: usize, height: usize, bit: u32, depth: u32) -> String {
    format!(
        "Record Rate(fps) : 10000\n\
Total Frame : {FRAMES}\n\
Image Width : {width}\n\
Image Height : {height}\n\
Color Bit : {bit}\n\
EffectiveBit Depth : {depth}\n\
EffectiveBit Side : Lower\n"
    )
}

fn generate_mock_raw_data(width: usize, height: usize, bit_size: u32) -> Vec<u8> {
    let len = FRAMES * width * height * bit_size as usize / 8;
    (0..len).map(|i| (i * 31 % 256) as u8).collect()
}

fn reader(width: usize, height: usize, bit_size: u32, depth: u32) -> MrawReader<MemorySource> {
    let config = ReaderConfig::builder()
        .bit_order_override(Some(BitOrder::Lower))
        .build();
    MrawReader::from_parts(
        MetadataEncoding::Cih,
        metadata(width, height, bit_size, depth).as_bytes(),
        MemorySource::new(generate_mock_raw_data(width, height, bit_size)),
        &config,
    )
    .expect("valid bench recording")
}

fn benchmark_decode_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_by_size");

    let sizes = vec![
        (128, 128, "128x128"),
        (512, 512, "512x512"),
        (1024, 1024, "1024x1024"),
    ];

    for (width, height, label) in sizes {
        group.bench_with_input(
            BenchmarkId::from_parameter(label),
            &(width, height),
            |b, &(width, height)| {
                let mut reader = reader(width, height, 16, 12);
                b.iter(|| reader.decode(black_box(1)).expect("decode"));
            },
        );
    }

    group.finish();
}

fn benchmark_decode_by_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_by_layout");

    let layouts = vec![
        (8, 8, "8bit"),
        (12, 12, "packed_12bit"),
        (16, 12, "16bit_shifted"),
    ];

    for (bit_size, depth, label) in layouts {
        group.bench_function(label, |b| {
            let mut reader = reader(512, 512, bit_size, depth);
            b.iter(|| reader.decode(black_box(2)).expect("decode"));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_decode_by_size,
    benchmark_decode_by_layout
);
criterion_main!(benches);
