//! Built-in "Jira/Bitbucket Data Center on AWS" reference architecture.

use nimbus::{
    NimbusError,
    color::Color,
    draw::StrokeDefinition,
    semantic::{Category, Diagram, DiagramBuilder, Direction, EdgeDirection, EdgeStyle},
};

pub const TITLE: &str = "Jira/Bitbucket Data Center on AWS";

/// Builds the data center blueprint.
///
/// # Errors
///
/// Returns [`NimbusError::Graph`] or [`NimbusError::Color`] only if the
/// topology below is inconsistent.
pub fn data_center_on_aws() -> Result<Diagram, NimbusError> {
    let mut builder = DiagramBuilder::new(TITLE).with_direction(Direction::LeftToRight);
    let root = builder.root();

    let dns = builder.node(root, "Route53", Category::Network)?;
    let iam = builder.node(root, "IAM", Category::Security)?;
    let secrets = builder.node(root, "Secrets Manager", Category::Security)?;
    let cloudwatch = builder.node(root, "CloudWatch", Category::Management)?;
    let ssm = builder.node(root, "Systems Manager", Category::Management)?;

    // VPC and networking
    let vpc = builder.cluster(root, "VPC")?;

    let public = builder.cluster(vpc, "Public Subnet")?;
    let cf = builder.node(public, "CloudFront", Category::Network)?;
    let alb = builder.node(public, "ALB", Category::Network)?;
    builder.node(public, "WAF", Category::Security)?;

    let private = builder.cluster(vpc, "Private Subnet")?;

    let ecs_cluster = builder.cluster(private, "ECS Cluster")?;
    let ecs = builder.node(ecs_cluster, "ECS", Category::Compute)?;
    let ec2 = builder.node(ecs_cluster, "EC2", Category::Compute)?;
    builder.link(ecs, ec2, &EdgeStyle::new(StrokeDefinition::dashed(color("brown")?)))?;

    let database = builder.cluster(private, "Database Layer")?;
    let rds_primary = builder.node(database, "RDS (Primary)", Category::Database)?;
    let rds_replica = builder.node(database, "RDS (Replica)", Category::Database)?;
    builder.link(
        rds_primary,
        rds_replica,
        &EdgeStyle::new(StrokeDefinition::dotted(color("blue")?)),
    )?;

    let storage = builder.cluster(private, "Storage Layer")?;
    let efs = builder.node(storage, "EFS", Category::Storage)?;
    let s3 = builder.node(storage, "S3", Category::Storage)?;

    let search = builder.cluster(private, "Search Layer")?;
    let opensearch = builder.node(search, "OpenSearch", Category::Analytics)?;

    // CI/CD pipeline
    let pipeline = builder.cluster(root, "CI/CD Pipeline")?;
    let github = builder.node(pipeline, "GitHub", Category::CiCd)?;
    let codebuild = builder.node(pipeline, "CodeBuild", Category::CiCd)?;
    let codedeploy = builder.node(pipeline, "CodeDeploy", Category::CiCd)?;
    builder.chain(&[github, codebuild, codedeploy], &EdgeStyle::default())?;

    // Security and monitoring
    let red = EdgeStyle::colored(color("red")?);
    let green = EdgeStyle::colored(color("green")?);
    builder.fan_out(iam, &[ecs, rds_primary, s3], &red)?;
    builder.fan_out(secrets, &[ecs, rds_primary], &red)?;
    builder.fan_out(cloudwatch, &[ecs, rds_primary, alb], &green)?;
    builder.fan_out(ssm, &[ec2, rds_primary], &green)?;

    // Request path and data flows
    builder.chain(&[dns, cf, alb, ecs], &EdgeStyle::default())?;
    builder.fan_out(
        ecs,
        &[rds_primary, efs, opensearch],
        &EdgeStyle::colored(color("brown")?),
    )?;
    builder.connect(
        rds_primary,
        s3,
        EdgeDirection::Forward,
        &EdgeStyle::colored(color("blue")?),
    )?;
    builder.connect(
        codedeploy,
        ecs,
        EdgeDirection::Forward,
        &EdgeStyle::colored(color("purple")?),
    )?;

    Ok(builder.build())
}

fn color(name: &str) -> Result<Color, NimbusError> {
    Color::new(name).map_err(NimbusError::Color)
}

#[cfg(test)]
mod tests {
    use nimbus::Renderer;

    use super::*;

    #[test]
    fn test_blueprint_shape() {
        let diagram = data_center_on_aws().unwrap();

        assert_eq!(diagram.title(), TITLE);
        assert_eq!(diagram.direction(), Direction::LeftToRight);
        assert_eq!(diagram.nodes().len(), 18);
        assert_eq!(diagram.clusters().len(), 8);
        assert_eq!(diagram.edges().len(), 22);
        assert_eq!(diagram.file_stem(), "jira_bitbucket_data_center_on_aws");
    }

    #[test]
    fn test_blueprint_nesting() {
        let diagram = data_center_on_aws().unwrap();
        let path_of = |label: &str| {
            let node = diagram
                .nodes()
                .iter()
                .find(|node| node.label() == label)
                .unwrap();
            diagram.cluster_path(node.id()).unwrap()
        };

        assert_eq!(path_of("Route53"), Vec::<&str>::new());
        assert_eq!(path_of("WAF"), vec!["VPC", "Public Subnet"]);
        assert_eq!(
            path_of("RDS (Replica)"),
            vec!["VPC", "Private Subnet", "Database Layer"]
        );
        assert_eq!(path_of("CodeDeploy"), vec!["CI/CD Pipeline"]);
    }

    #[test]
    fn test_undirected_edges() {
        let diagram = data_center_on_aws().unwrap();
        let undirected = diagram
            .edges()
            .iter()
            .filter(|edge| edge.direction() == EdgeDirection::None)
            .count();
        assert_eq!(undirected, 2);
    }

    #[test]
    fn test_dot_has_one_subgraph_per_cluster() {
        let diagram = data_center_on_aws().unwrap();
        let dot = Renderer::default().to_dot(&diagram).unwrap();

        assert_eq!(dot.matches("subgraph").count(), 8);
        assert_eq!(dot.matches("->").count(), 22);
        assert!(dot.contains("RDS (Primary)"));
    }
}
