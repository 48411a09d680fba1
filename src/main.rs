use glam::DVec2;
use two_delaunay::VoronoiBuilder;

fn main() {
    let sites = vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(4.0, 1.0),
        DVec2::new(2.0, 5.0),
        DVec2::new(-3.0, 2.0),
        DVec2::new(1.0, -4.0),
    ];

    let mut voronoi = VoronoiBuilder::new();
    voronoi
        .add_points(sites.into_iter())
        .expect("sites fit the default bounds");

    println!(
        "{} sites, {} triangles",
        voronoi.sites().len(),
        voronoi.triangles().len()
    );

    for region in voronoi.regions().expect("interior fans are closed") {
        println!("cell: {region:?}");
    }
}
