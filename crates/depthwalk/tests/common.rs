#![allow(missing_docs, dead_code)]

/// A `DescribeTaskDefinition` response body, with members the models do not
/// know about mixed in.
pub const TASK_DEFINITION: &str = r#"
{
    "taskDefinition": null,
    "taskDefinitionArn": "arn:aws:ecs:us-east-1:123456789012:task-definition/hello_world:8",
    "containerDefinitions": [
        {
            "environment": [],
            "name": "wordpress",
            "links": ["mysql"],
            "mountPoints": [],
            "image": "wordpress",
            "essential": true,
            "portMappings": [
                {"containerPort": 80, "hostPort": 80}
            ],
            "memory": 500,
            "cpu": 10,
            "volumesFrom": []
        },
        {
            "environment": [
                {"name": "MYSQL_ROOT_PASSWORD", "value": "password"}
            ],
            "name": "mysql",
            "mountPoints": [
                {"sourceVolume": "data", "containerPath": "/var/lib/mysql", "readOnly": false}
            ],
            "image": "mysql",
            "cpu": 10,
            "portMappings": [],
            "entryPoint": ["docker-entrypoint.sh"],
            "command": ["mysqld", "--default-authentication-plugin=mysql_native_password"],
            "memory": 500,
            "essential": true,
            "healthCheck": {
                "command": ["CMD-SHELL", "mysqladmin ping"],
                "interval": 30,
                "name": {"name": "not-a-container-name"}
            }
        }
    ],
    "family": "hello_world",
    "revision": 8,
    "volumes": [
        {"name": "data", "host": {"sourcePath": "/ecs/mysql"}}
    ],
    "status": "ACTIVE",
    "registeredAt": 1438220400.5
}
"#;

/// A `CreateDistributionWithTags` request body.
pub const DISTRIBUTION_WITH_TAGS: &str = r#"
{
    "DistributionConfig": {
        "CallerReference": "2024-06-01T00:00:00Z",
        "Aliases": {"Quantity": 1, "Items": ["www.example.com"]},
        "DefaultRootObject": "index.html",
        "Origins": {
            "Quantity": 1,
            "Items": [
                {
                    "Id": "origin-1",
                    "DomainName": "example.s3.amazonaws.com",
                    "S3OriginConfig": {"OriginAccessIdentity": ""}
                }
            ]
        },
        "DefaultCacheBehavior": {
            "TargetOriginId": "origin-1",
            "ViewerProtocolPolicy": "redirect-to-https",
            "MinTTL": 0
        },
        "Comment": "static site",
        "PriceClass": "PriceClass_100",
        "Enabled": true,
        "HttpVersion": "http2",
        "IsIPV6Enabled": true
    },
    "Tags": {
        "Items": [
            {"Key": "project", "Value": "site"},
            {"Key": "DistributionConfig", "Value": "not-the-config"}
        ]
    }
}
"#;
